//! Configuration read from the process environment.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";
pub const DEFAULT_LISTEN: &str = "unix:///var/run/scope/plugins/epa/epa.sock";

const UNIX_SCHEME: &str = "unix://";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported docker host `{0}`: only unix sockets are supported")]
    UnsupportedDockerHost(String),
    #[error("invalid docker API version `{0}`: expected `<major>.<minor>`")]
    InvalidApiVersion(String),
    #[error("invalid listen address `{0}`")]
    InvalidListenAddr(String),
    #[error("environment variable `{name}` is not valid unicode")]
    NotUnicode { name: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where the report endpoint is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddr {
    Tcp(String),
    Unix(PathBuf),
}

impl FromStr for ListenAddr {
    type Err = Error;

    /// Parses either `unix://<path>` or a TCP `host:port`.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(path) = s.strip_prefix(UNIX_SCHEME) {
            if path.is_empty() {
                return Err(Error::InvalidListenAddr(s.to_owned()));
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }

        match s.rsplit_once(':') {
            Some((_, port)) if port.parse::<u16>().is_ok() && !s.contains("://") => {
                Ok(Self::Tcp(s.to_owned()))
            }
            _ => Err(Error::InvalidListenAddr(s.to_owned())),
        }
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "http://{addr}"),
            Self::Unix(path) => write!(f, "{UNIX_SCHEME}{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the container runtime's control socket.
    pub docker_socket: PathBuf,
    /// Pinned runtime API version, e.g. `1.41`.
    pub docker_api_version: Option<String>,
    pub listen: ListenAddr,
}

impl Config {
    /// Reads `DOCKER_HOST`, `DOCKER_API_VERSION` and `EPA_LISTEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name))
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> std::result::Result<String, std::env::VarError>,
    ) -> Result<Self> {
        let var = |name: &'static str| match lookup(name) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(Error::NotUnicode { name }),
        };

        let docker_socket = parse_docker_host(
            var("DOCKER_HOST")?
                .as_deref()
                .unwrap_or(DEFAULT_DOCKER_HOST),
        )?;
        let docker_api_version = var("DOCKER_API_VERSION")?
            .map(|version| parse_api_version(&version))
            .transpose()?;
        let listen = var("EPA_LISTEN")?
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN)
            .parse::<ListenAddr>()?;

        Ok(Self {
            docker_socket,
            docker_api_version,
            listen,
        })
    }
}

fn parse_docker_host(host: &str) -> Result<PathBuf> {
    let path = host.strip_prefix(UNIX_SCHEME).unwrap_or(host);
    if !path.starts_with('/') {
        return Err(Error::UnsupportedDockerHost(host.to_owned()));
    }
    Ok(PathBuf::from(path))
}

fn parse_api_version(version: &str) -> Result<String> {
    let version = version.strip_prefix('v').unwrap_or(version);
    match version.split_once('.') {
        Some((major, minor))
            if major.parse::<u32>().is_ok() && minor.parse::<u32>().is_ok() =>
        {
            Ok(version.to_owned())
        }
        _ => Err(Error::InvalidApiVersion(version.to_owned())),
    }
}
