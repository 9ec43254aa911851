use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for worldarea
#[derive(Debug, Parser)]
#[command(
    name = "worldarea",
    version,
    about = "Equal-area country statistics: ranked CSV, choropleth PNG and Leaflet point map"
)]
pub struct CliArgs {
    /// Output root; figures/ and maps/ are created below it
    #[arg(short = 'o', long = "out-dir", default_value = "outputs")]
    pub out_dir: PathBuf,

    /// GeoJSON FeatureCollection to use instead of the bundled dataset (.geojson or .geojson.gz)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Feature name dropped before computing statistics
    #[arg(long = "exclude", default_value = worldarea_core::filter::DEFAULT_EXCLUDED)]
    pub exclude: String,

    /// Rows written to the ranked CSV
    #[arg(long = "top", default_value_t = worldarea_core::export::table::DEFAULT_TOP_N)]
    pub top: usize,

    /// Debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn into_config(self) -> worldarea_core::PipelineConfig {
        worldarea_core::PipelineConfig {
            out_dir: self.out_dir,
            input: self.input,
            exclude: self.exclude,
            top_n: self.top,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_the_default_run() {
        let args = CliArgs::parse_from(["worldarea"]);
        assert_eq!(args.into_config(), worldarea_core::PipelineConfig::default());
    }

    #[test]
    fn overrides_reach_the_config() {
        let args = CliArgs::parse_from([
            "worldarea", "-o", "/tmp/x", "--exclude", "Greenland", "--top", "5", "-v",
        ]);
        assert!(args.verbose);
        let cfg = args.into_config();
        assert_eq!(cfg.out_dir, PathBuf::from("/tmp/x"));
        assert_eq!(cfg.exclude, "Greenland");
        assert_eq!(cfg.top_n, 5);
        assert!(cfg.input.is_none());
    }
}
