//! The sql dialects a field can report its column type for

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/**
The representation of all supported sql dialects.

Parsing accepts the names drivers commonly report, e.g. `"postgres"` or `"sqlite3"`.
 */
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Dialect {
    /// MySQL
    #[strum(serialize = "mysql")]
    MySQL,
    /// MariaDB
    #[strum(serialize = "mariadb")]
    MariaDB,
    /// Postgres
    #[strum(serialize = "postgres", serialize = "postgresql")]
    Postgres,
    /// Microsoft SQL Server
    #[strum(serialize = "sqlserver")]
    SQLServer,
    /// SQLite
    #[strum(serialize = "sqlite", serialize = "sqlite3")]
    SQLite,
    /// YDB
    #[strum(serialize = "ydb")]
    YDB,
    /// ClickHouse
    #[strum(serialize = "clickhouse")]
    ClickHouse,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use crate::dialect::Dialect;

    #[test]
    fn parse_driver_names() {
        assert_eq!(Dialect::from_str("postgres").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_str("sqlite3").unwrap(), Dialect::SQLite);
        assert_eq!(Dialect::from_str("ClickHouse").unwrap(), Dialect::ClickHouse);
        assert!(Dialect::from_str("oracle").is_err());
    }

    #[test]
    fn display_round_trips() {
        for dialect in Dialect::iter() {
            assert_eq!(Dialect::from_str(&dialect.to_string()).unwrap(), dialect);
        }
    }
}
