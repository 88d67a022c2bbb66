pub mod series;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use utoipa::ToSchema;

/// Which market an hourly price export comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "./market.ts")]
pub enum MarketKind {
    /// Day-ahead wholesale auction run by OMIE.
    Omie,
    /// Regulated small-consumer tariff published by REE through ESIOS.
    Pvpc,
}

impl MarketKind {
    /// Short uppercase name of the market
    pub fn name(&self) -> &'static str {
        match self {
            MarketKind::Omie => "OMIE",
            MarketKind::Pvpc => "PVPC",
        }
    }

    /// Source line printed under charts and captions
    pub fn source_label(&self) -> &'static str {
        match self {
            MarketKind::Omie => "Fuente: OMIE",
            MarketKind::Pvpc => "Fuente: ESIOS (REE)",
        }
    }

    /// Suffix appended to the chart title.
    /// The wholesale price is the default reading, so only PVPC is tagged.
    pub fn title_suffix(&self) -> &'static str {
        match self {
            MarketKind::Omie => "",
            MarketKind::Pvpc => " (PVPC)",
        }
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(MarketKind::Omie.source_label(), "Fuente: OMIE");
        assert_eq!(MarketKind::Pvpc.source_label(), "Fuente: ESIOS (REE)");
        assert_eq!(MarketKind::Omie.title_suffix(), "");
        assert_eq!(MarketKind::Pvpc.title_suffix(), " (PVPC)");
        assert_eq!(MarketKind::Pvpc.to_string(), "PVPC");
    }
}
