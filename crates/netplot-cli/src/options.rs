//! Command-line options.

use clap::Args;

use netplot_core::PrintMask;

/// Options controlling what is rendered and where it goes.
#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    /// Output format (see --list-formats)
    #[arg(short = 'F', long = "format", value_name = "FORMAT", default_value = "dot")]
    pub format: String,

    /// Property categories to show: comma separated list of 'state', 'config', 'all' or 'none'
    #[arg(long = "print", value_name = "MASK", default_value = "all", value_parser = parse_mask)]
    pub print_mask: PrintMask,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: "dot".to_string(),
            print_mask: PrintMask::all(),
            output: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_print_mask(mut self, mask: PrintMask) -> Self {
        self.print_mask = mask;
        self
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output;
        self
    }
}

fn parse_mask(s: &str) -> Result<PrintMask, String> {
    s.parse::<PrintMask>().map_err(|e| e.message().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netplot_core::PropCategory;

    #[test]
    fn test_parse_mask_message() {
        assert_eq!(
            parse_mask("bogus").unwrap_err(),
            "unknown property category 'bogus'"
        );
        let mask = parse_mask("state").unwrap();
        assert!(!mask.visible(PropCategory::Config));
    }
}
