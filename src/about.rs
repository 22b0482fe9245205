pub const SEQVIEW_DISPLAY_VERSION: &str = env!("SEQVIEW_DISPLAY_VERSION");
pub const SEQVIEW_BUILD_N: &str = env!("SEQVIEW_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "seqview {}\nBuild {}\nAnnotated nucleotide sequence layout engine",
        SEQVIEW_DISPLAY_VERSION, SEQVIEW_BUILD_N
    )
}
