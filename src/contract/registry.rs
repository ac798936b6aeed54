use super::{INPUT_LEFT, INVALID_RIGHT, OUTPUT_RIGHT, VALID_RIGHT, VisualContract};
use crate::role::RoleTag;

/// Defines the contract table and `contract_for` in one place.
///
/// The generated `match` has no wildcard arm, so adding a `RoleTag` without a
/// contract is a compile error.
macro_rules! define_contracts {
    ( $( $tag:ident => { color: $color:expr, targets: [ $( $t:expr ),* ], sources: [ $( $s:expr ),* ] } ),* $(,)? ) => {
        /// Returns the visual contract for `tag`.
        pub fn contract_for(tag: RoleTag) -> &'static VisualContract {
            match tag {
                $(
                    RoleTag::$tag => {
                        static CONTRACT: VisualContract = VisualContract {
                            color: $color,
                            target_handles: &[ $( $t ),* ],
                            source_handles: &[ $( $s ),* ],
                        };
                        &CONTRACT
                    }
                )*
            }
        }
    };
}

define_contracts! {
    // Builder palette
    Input => { color: "hsl(var(--node-input))", targets: [], sources: [OUTPUT_RIGHT] },
    Process => { color: "hsl(var(--node-process))", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    Output => { color: "hsl(var(--node-output))", targets: [INPUT_LEFT], sources: [] },
    Conditional => {
        color: "hsl(var(--node-conditional))",
        targets: [INPUT_LEFT],
        sources: [VALID_RIGHT, INVALID_RIGHT]
    },

    // Mediation stages
    SftpCollector => { color: "hsl(217 91% 60%)", targets: [], sources: [OUTPUT_RIGHT] },
    Fdc => { color: "hsl(142 76% 36%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    Asn1Decoder => { color: "hsl(271 91% 65%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    AsciiDecoder => { color: "hsl(45 93% 47%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    ValidationBln => {
        color: "hsl(0 84% 60%)",
        targets: [INPUT_LEFT],
        sources: [VALID_RIGHT, INVALID_RIGHT]
    },
    EnrichmentBln => { color: "hsl(25 95% 53%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    Encoder => { color: "hsl(173 80% 40%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    DiameterInterface => { color: "hsl(231 81% 63%)", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
    RawBackup => { color: "hsl(0 0% 45%)", targets: [INPUT_LEFT], sources: [] },
    Generic => { color: "hsl(var(--muted-foreground))", targets: [INPUT_LEFT], sources: [OUTPUT_RIGHT] },
}
