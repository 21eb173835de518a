use clap::{ArgAction, Parser};

/// Command-line surface. Flag spelling follows the original tool so existing
/// backup scripts keep working, including `--flag=true|false` for booleans.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sendgrid_export",
    version,
    about = "Export SendGrid dynamic transactional templates to local files"
)]
pub struct Cli {
    /// SendGrid API key (not the API Key ID!) used to access the service
    #[arg(long = "apikey", value_name = "KEY")]
    pub api_key: String,

    /// Directory the template files are written to; must already exist [default: current directory]
    #[arg(long = "basedir", value_name = "DIR", default_value = "", hide_default_value = true)]
    pub base_dir: String,

    /// Also write the plain-text body of each version
    #[arg(
        long = "include_plain",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub include_plain: bool,

    /// Overwrite files that already exist
    #[arg(
        long = "overwrite",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub overwrite: bool,

    /// Export every version instead of only the active one
    #[arg(
        long = "all",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub all: bool,
}
