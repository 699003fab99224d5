use crate::metrics::traits::WarehouseMetricsRecorder;

#[derive(Debug, Default, Clone)]
pub struct WarehouseMetrics {
    pub insert_calls: u64,
    pub home_inserts: u64,
    pub sibling_inserts: u64,
    pub evictions: u64,
    pub replacements: u64,
    pub restock_calls: u64,
    pub delete_calls: u64,
    pub purchase_calls: u64,
    pub purchase_applied: u64,
    pub purchase_rejected: u64,
    pub lookup_misses: u64,
    pub clears: u64,
}

impl WarehouseMetricsRecorder for WarehouseMetrics {
    #[inline]
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    #[inline]
    fn record_home_insert(&mut self) {
        self.home_inserts += 1;
    }

    #[inline]
    fn record_sibling_insert(&mut self) {
        self.sibling_inserts += 1;
    }

    #[inline]
    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    fn record_replacement(&mut self) {
        self.replacements += 1;
    }

    #[inline]
    fn record_restock_call(&mut self) {
        self.restock_calls += 1;
    }

    #[inline]
    fn record_delete_call(&mut self) {
        self.delete_calls += 1;
    }

    #[inline]
    fn record_purchase_call(&mut self) {
        self.purchase_calls += 1;
    }

    #[inline]
    fn record_purchase_applied(&mut self) {
        self.purchase_applied += 1;
    }

    #[inline]
    fn record_purchase_rejected(&mut self) {
        self.purchase_rejected += 1;
    }

    #[inline]
    fn record_lookup_miss(&mut self) {
        self.lookup_misses += 1;
    }

    #[inline]
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}
