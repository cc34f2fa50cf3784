pub(crate) mod instrumentation;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[clap(version, about)]
pub(crate) struct RunnerInitCli {
    /// GitHub API root. Anything other than exactly `https://api.github.com` is treated as a GitHub Enterprise Server.
    #[clap(long, env = "GITHUB_URL", value_parser = StringToNoneParser, default_value = "")]
    pub(crate) url: OptionString,
    /// Organization the runner registers with.
    #[clap(long, env = "GITHUB_ORGANIZATION", default_value = "")]
    pub(crate) organization: String,
    /// Token allowed to create runner registration tokens for the organization.
    #[clap(
        long,
        env = "GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub(crate) token: String,
    // Read for compatibility with existing deployments, not used when requesting a token.
    #[clap(long, env = "GITHUB_RUNNER_SERVICE_ACCOUNT", value_parser = StringToNoneParser, default_value = "")]
    pub(crate) service_account: OptionString,
    /// Where the registration token is written.
    #[clap(long, env = "GITHUB_RUNNER_TOKEN_DEST", value_parser = PathBufToNoneParser, default_value = "")]
    pub(crate) token_dest: OptionPathBuf,

    #[clap(flatten)]
    pub instrumentation: instrumentation::Instrumentation,
}

#[derive(Clone, Debug)]
pub struct OptionString(pub Option<String>);

#[derive(Clone)]
struct StringToNoneParser;

impl clap::builder::TypedValueParser for StringToNoneParser {
    type Value = OptionString;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let inner = clap::builder::StringValueParser::new();
        let val = inner.parse_ref(cmd, arg, value)?;

        if val.is_empty() {
            Ok(OptionString(None))
        } else {
            Ok(OptionString(Some(val)))
        }
    }
}

#[derive(Clone, Debug)]
pub struct OptionPathBuf(pub Option<PathBuf>);

#[derive(Clone)]
struct PathBufToNoneParser;

impl clap::builder::TypedValueParser for PathBufToNoneParser {
    type Value = OptionPathBuf;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let inner = clap::builder::StringValueParser::new();
        let val = inner.parse_ref(cmd, arg, value)?;

        if val.is_empty() {
            Ok(OptionPathBuf(None))
        } else {
            Ok(OptionPathBuf(Some(PathBuf::from(val))))
        }
    }
}
