//! Role tags: the closed set of stage kinds a mediation pipeline node can take.

use crate::error::ParseRoleTagError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod classifier;

pub use classifier::{CLASSIFICATION_RULES, ClassificationRule, classify, classify_optional};

/// The classified kind of a stage. Drives the node's visual contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Input,
    Process,
    Output,
    Conditional,
    SftpCollector,
    Fdc,
    Asn1Decoder,
    AsciiDecoder,
    ValidationBln,
    EnrichmentBln,
    Encoder,
    DiameterInterface,
    RawBackup,
    Generic,
}

impl RoleTag {
    pub const ALL: [RoleTag; 14] = [
        RoleTag::Input,
        RoleTag::Process,
        RoleTag::Output,
        RoleTag::Conditional,
        RoleTag::SftpCollector,
        RoleTag::Fdc,
        RoleTag::Asn1Decoder,
        RoleTag::AsciiDecoder,
        RoleTag::ValidationBln,
        RoleTag::EnrichmentBln,
        RoleTag::Encoder,
        RoleTag::DiameterInterface,
        RoleTag::RawBackup,
        RoleTag::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleTag::Input => "input",
            RoleTag::Process => "process",
            RoleTag::Output => "output",
            RoleTag::Conditional => "conditional",
            RoleTag::SftpCollector => "sftp_collector",
            RoleTag::Fdc => "fdc",
            RoleTag::Asn1Decoder => "asn1_decoder",
            RoleTag::AsciiDecoder => "ascii_decoder",
            RoleTag::ValidationBln => "validation_bln",
            RoleTag::EnrichmentBln => "enrichment_bln",
            RoleTag::Encoder => "encoder",
            RoleTag::DiameterInterface => "diameter_interface",
            RoleTag::RawBackup => "raw_backup",
            RoleTag::Generic => "generic",
        }
    }

    /// Human-readable caption shown on the node body.
    pub fn caption(self) -> &'static str {
        match self {
            RoleTag::Input => "Data Source",
            RoleTag::Process => "Process",
            RoleTag::Output => "Output",
            RoleTag::Conditional => "Conditional",
            RoleTag::SftpCollector => "SFTP Source",
            RoleTag::Fdc => "FDC Processor",
            RoleTag::Asn1Decoder => "ASN.1 Decoder",
            RoleTag::AsciiDecoder => "ASCII Decoder",
            RoleTag::ValidationBln => "Validation",
            RoleTag::EnrichmentBln => "Enrichment",
            RoleTag::Encoder => "Encoder",
            RoleTag::DiameterInterface => "Diameter Interface",
            RoleTag::RawBackup => "Raw Backup",
            RoleTag::Generic => "Stage",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RoleTag {
    type Err = ParseRoleTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RoleTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseRoleTagError(s.to_string()))
    }
}
