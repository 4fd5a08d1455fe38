use clap::Parser;
use std::path::PathBuf;

/// Reads surface points from standard input and writes their values, keyed by their offset in the whole cube, to standard
/// output as raw (u64, f32) records.
#[derive(Debug, Parser)]
#[command(name = "stitch", version)]
pub struct Config {
    /// Manifest file, relative to the input directory.
    pub manifest: PathBuf,

    /// Directory holding the manifest and the fragment files.
    #[arg(short, long, default_value = "./")]
    pub input_dir: PathBuf,

    /// Append a timing report to the time file.
    #[arg(short, long)]
    pub time: bool,

    /// Where the timing report is appended.
    #[arg(long, default_value = "./time")]
    pub time_file: PathBuf,

    /// Number of worker threads. Defaults to the number of logical CPUs.
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["stitch", "manifest.json"]).unwrap();

        assert_eq!(config.manifest, PathBuf::from("manifest.json"));
        assert_eq!(config.input_dir, PathBuf::from("./"));
        assert!(!config.time);
        assert_eq!(config.time_file, PathBuf::from("./time"));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn short_flags() {
        let config =
            Config::try_parse_from(["stitch", "-t", "-i", "/data", "-j", "4", "m.json"]).unwrap();

        assert!(config.time);
        assert_eq!(config.input_dir, PathBuf::from("/data"));
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn manifest_is_required() {
        assert!(Config::try_parse_from(["stitch"]).is_err());
    }
}
