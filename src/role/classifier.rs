use super::RoleTag;

/// One row of the classification table: any keyword hit selects `tag`.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub keywords: &'static [&'static str],
    pub tag: RoleTag,
}

impl ClassificationRule {
    fn matches(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|kw| lowered_name.contains(kw))
    }
}

/// Ordered rule table, evaluated first-match-wins.
///
/// The order is load-bearing. "decoder" is an `asn1_decoder` keyword but it must be
/// tried after "ascii", otherwise "ASCII Decoder" would classify as ASN.1.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        keywords: &["sftp", "collector"],
        tag: RoleTag::SftpCollector,
    },
    ClassificationRule {
        keywords: &["fdc"],
        tag: RoleTag::Fdc,
    },
    ClassificationRule {
        keywords: &["asn1"],
        tag: RoleTag::Asn1Decoder,
    },
    ClassificationRule {
        keywords: &["ascii"],
        tag: RoleTag::AsciiDecoder,
    },
    ClassificationRule {
        keywords: &["decoder"],
        tag: RoleTag::Asn1Decoder,
    },
    ClassificationRule {
        keywords: &["validation"],
        tag: RoleTag::ValidationBln,
    },
    ClassificationRule {
        keywords: &["enrichment"],
        tag: RoleTag::EnrichmentBln,
    },
    ClassificationRule {
        keywords: &["encoder"],
        tag: RoleTag::Encoder,
    },
    ClassificationRule {
        keywords: &["diameter"],
        tag: RoleTag::DiameterInterface,
    },
    ClassificationRule {
        keywords: &["backup"],
        tag: RoleTag::RawBackup,
    },
];

/// Maps a free-text stage name to its role. Never fails: unmatched names are `Generic`.
pub fn classify(name: &str) -> RoleTag {
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return RoleTag::Generic;
    }
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map_or(RoleTag::Generic, |rule| rule.tag)
}

/// Same as [`classify`], for stages whose name may be missing.
pub fn classify_optional(name: Option<&str>) -> RoleTag {
    name.map_or(RoleTag::Generic, classify)
}
