//! Tagged warehouse commands and their text format.
//!
//! A command script starts with a record count followed by one command per
//! line. A stock list has the same header followed by untagged
//! `<day> <id> <name> <stock> <demand>` rows, applied with
//! [`Warehouse::better_add_product`](crate::store::Warehouse::better_add_product).
//!
//! ```text
//!   4                      ← record count
//!   add 1 10 bolts 20 3    ← add <day> <id> <name> <stock> <demand>
//!   restock 10 5           ← restock <id> <amount>
//!   purchase 2 10 4        ← purchase <day> <id> <amount>
//!   delete 10              ← delete <id>
//! ```
//!
//! Blank lines are skipped and do not count as records. Text after the
//! count on the header line is ignored. Line numbers in errors are 1-based.
//!
//! ## Example
//!
//! ```
//! use stockkit::command::{parse_commands, Command};
//! use stockkit::store::Warehouse;
//!
//! let script = "2\nadd 1 10 bolts 20 3\npurchase 2 10 4\n";
//! let commands = parse_commands(script).unwrap();
//! assert_eq!(commands[1], Command::Purchase { day: 2, id: 10, amount: 4 });
//!
//! let mut warehouse = Warehouse::new();
//! warehouse.apply_all(commands);
//! assert_eq!(warehouse.get(10).unwrap().stock(), 16);
//! ```

use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};
use crate::item::StockEntry;

/// One warehouse operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        day: u32,
        id: u64,
        name: String,
        stock: u64,
        demand: u64,
    },
    Restock {
        id: u64,
        amount: u64,
    },
    Delete {
        id: u64,
    },
    Purchase {
        day: u32,
        id: u64,
        amount: u64,
    },
}

impl Command {
    /// Id of the item the command targets.
    pub fn id(&self) -> u64 {
        match self {
            Command::Add { id, .. }
            | Command::Restock { id, .. }
            | Command::Delete { id }
            | Command::Purchase { id, .. } => *id,
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some((&tag, args)) = fields.split_first() else {
            return Err(ParseError::new(1, ParseErrorKind::EmptyRecord));
        };
        match tag {
            "add" => {
                expect_fields(args, 5)?;
                Ok(Command::Add {
                    day: number("day", args[0])?,
                    id: number("id", args[1])?,
                    name: args[2].to_string(),
                    stock: number("stock", args[3])?,
                    demand: number("demand", args[4])?,
                })
            },
            "restock" => {
                expect_fields(args, 2)?;
                Ok(Command::Restock {
                    id: number("id", args[0])?,
                    amount: number("amount", args[1])?,
                })
            },
            "delete" => {
                expect_fields(args, 1)?;
                Ok(Command::Delete {
                    id: number("id", args[0])?,
                })
            },
            "purchase" => {
                expect_fields(args, 3)?;
                Ok(Command::Purchase {
                    day: number("day", args[0])?,
                    id: number("id", args[1])?,
                    amount: number("amount", args[2])?,
                })
            },
            other => Err(ParseError::new(
                1,
                ParseErrorKind::UnknownCommand(other.to_string()),
            )),
        }
    }
}

impl FromStr for StockEntry {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Err(ParseError::new(1, ParseErrorKind::EmptyRecord));
        }
        expect_fields(&fields, 5)?;
        Ok(StockEntry {
            day: number("day", fields[0])?,
            id: number("id", fields[1])?,
            name: fields[2].to_string(),
            stock: number("stock", fields[3])?,
            demand: number("demand", fields[4])?,
        })
    }
}

/// Parses a counted command script.
///
/// # Errors
///
/// Returns [`ParseError`] for a missing or malformed count, fewer records
/// than announced, or any malformed record.
pub fn parse_commands(input: &str) -> Result<Vec<Command>, ParseError> {
    parse_records(input)
}

/// Parses a counted stock list.
///
/// # Errors
///
/// Same conditions as [`parse_commands`].
pub fn parse_stock_list(input: &str) -> Result<Vec<StockEntry>, ParseError> {
    parse_records(input)
}

fn parse_records<T>(input: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr<Err = ParseError>,
{
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Err(ParseError::new(1, ParseErrorKind::MissingCount));
    };
    let count_field = header.split_whitespace().next().unwrap_or_default();
    let count: usize = number("record count", count_field).map_err(|e| e.at_line(header_line))?;

    let mut records = Vec::new();
    let mut last_line = header_line;
    for (line_no, line) in lines.take(count) {
        records.push(line.parse::<T>().map_err(|e| e.at_line(line_no))?);
        last_line = line_no;
    }
    if records.len() < count {
        return Err(ParseError::new(
            last_line,
            ParseErrorKind::MissingRecords {
                expected: count,
                found: records.len(),
            },
        ));
    }
    Ok(records)
}

fn expect_fields(args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::new(
            1,
            ParseErrorKind::FieldCount {
                expected,
                found: args.len(),
            },
        ))
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| {
        ParseError::new(
            1,
            ParseErrorKind::InvalidNumber {
                field,
                value: value.to_string(),
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_tag() {
        assert_eq!(
            "add 3 17 hammer 12 4".parse::<Command>().unwrap(),
            Command::Add {
                day: 3,
                id: 17,
                name: "hammer".into(),
                stock: 12,
                demand: 4
            }
        );
        assert_eq!(
            "restock 17 5".parse::<Command>().unwrap(),
            Command::Restock { id: 17, amount: 5 }
        );
        assert_eq!(
            "delete 17".parse::<Command>().unwrap(),
            Command::Delete { id: 17 }
        );
        assert_eq!(
            "  purchase 9 17 2  ".parse::<Command>().unwrap(),
            Command::Purchase {
                day: 9,
                id: 17,
                amount: 2
            }
        );
    }

    #[test]
    fn command_id_accessor() {
        assert_eq!(Command::Delete { id: 4 }.id(), 4);
        assert_eq!(Command::Restock { id: 8, amount: 1 }.id(), 8);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "sell 1 2".parse::<Command>().unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::UnknownCommand("sell".into()));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = "restock 1".parse::<Command>().unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::FieldCount {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let err = "purchase 1 2 -3".parse::<Command>().unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::InvalidNumber {
                field: "amount",
                value: "-3".into()
            }
        );
    }

    #[test]
    fn empty_line_is_an_error() {
        let err = "   ".parse::<Command>().unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::EmptyRecord);
    }

    #[test]
    fn parse_commands_reads_count_then_records() {
        let script = "3 commands follow\nadd 1 10 bolts 20 3\n\nrestock 10 5\ndelete 10\nadd 9 9 ignored 1 1\n";
        let commands = parse_commands(script).unwrap();
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[2], Command::Delete { id: 10 });
    }

    #[test]
    fn parse_commands_reports_line_numbers() {
        let script = "2\nadd 1 10 bolts 20 3\nrestock ten 5\n";
        let err = parse_commands(script).unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(err.to_string(), "line 3: invalid id `ten`");
    }

    #[test]
    fn parse_commands_detects_short_input() {
        let err = parse_commands("3\ndelete 1\n").unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::MissingRecords {
                expected: 3,
                found: 1
            }
        );
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn parse_commands_requires_count() {
        assert_eq!(
            parse_commands("").unwrap_err().kind(),
            &ParseErrorKind::MissingCount
        );
        let err = parse_commands("add 1 10 bolts 20 3\n").unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::InvalidNumber { field: "record count", .. }));
    }

    #[test]
    fn parse_stock_list_reads_untagged_rows() {
        let list = "2\n1 10 bolts 20 3\n2 21 nuts 5 1\n";
        let entries = parse_stock_list(list).unwrap();
        assert_eq!(entries[0], StockEntry::new(1, 10, "bolts", 20, 3));
        assert_eq!(entries[1], StockEntry::new(2, 21, "nuts", 5, 1));
    }

    #[test]
    fn stock_entry_rejects_tagged_row() {
        let err = "add 1 10 bolts 20 3".parse::<StockEntry>().unwrap_err();
        assert_eq!(
            err.kind(),
            &ParseErrorKind::FieldCount {
                expected: 5,
                found: 6
            }
        );
    }
}
