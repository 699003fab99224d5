#![no_main]

use libfuzzer_sys::fuzz_target;
use stockkit::builder::WarehouseBuilder;
use stockkit::policy::DemandRecency;

// Fuzz arbitrary operation sequences on Warehouse
//
// Drives add, better_add, restock, delete and purchase with small ids so
// buckets fill and collide, checking heap order and id uniqueness after
// every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let buckets = (data[0] as usize % 12).max(1);
    let capacity = (data[1] as usize % 6).max(1);
    let mut warehouse = WarehouseBuilder::new()
        .buckets(buckets)
        .bucket_capacity(capacity)
        .build(DemandRecency);

    let mut idx = 2;
    while idx + 3 < data.len() {
        let op = data[idx] % 5;
        let id = data[idx + 1] as u64 % 64;
        let amount = data[idx + 2] as u64;
        let day = data[idx + 3] as u32;

        match op {
            0 => {
                warehouse.add_product(id, "fuzz", amount, day, amount % 7);
            },
            1 => {
                let was_full = warehouse.len() == warehouse.capacity();
                let present = warehouse.contains(id);
                let insertion = warehouse.better_add_product(id, "fuzz", amount, day, amount % 7);
                if insertion.evicted.is_some() {
                    assert!(was_full && !present);
                }
            },
            2 => {
                warehouse.restock_product(id, amount);
            },
            3 => {
                if warehouse.delete_product(id).is_some() {
                    assert!(!warehouse.contains(id));
                }
            },
            4 => {
                let before = warehouse.get(id).map(|item| item.stock());
                let outcome = warehouse.purchase_product(id, day, amount % 16);
                if let Some(stock) = before
                    && !outcome.is_applied()
                {
                    assert_eq!(warehouse.get(id).map(|item| item.stock()), Some(stock));
                }
            },
            _ => unreachable!(),
        }

        assert!(warehouse.len() <= warehouse.capacity());
        warehouse.check_invariants().unwrap();

        idx += 4;
    }
});
