// tempo-core/src/domain/schema/tables.rs

use std::fmt;

use crate::domain::error::DomainError;

/// The seven tables of the warehouse: two raw staging tables, one fact
/// table and four dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    StagingEvents,
    StagingSongs,
    Songplays,
    Users,
    Songs,
    Artists,
    Time,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::StagingEvents,
        Table::StagingSongs,
        Table::Songplays,
        Table::Users,
        Table::Songs,
        Table::Artists,
        Table::Time,
    ];

    pub const FACT: Table = Table::Songplays;

    pub const DIMENSIONS: [Table; 4] = [Table::Users, Table::Songs, Table::Artists, Table::Time];

    pub const fn name(self) -> &'static str {
        match self {
            Table::StagingEvents => "staging_events",
            Table::StagingSongs => "staging_songs",
            Table::Songplays => "songplays",
            Table::Users => "users",
            Table::Songs => "songs",
            Table::Artists => "artists",
            Table::Time => "time",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|table| table.name() == name)
            .ok_or_else(|| DomainError::UnknownTable(name.to_string()))
    }

    pub const fn is_staging(self) -> bool {
        matches!(self, Table::StagingEvents | Table::StagingSongs)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
