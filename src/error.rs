/// Extension for results whose failure is only worth a log line.
pub trait ResultOkLogExt<T> {
    /// Converts into an `Option`, logging the error at error level.
    fn ok_log(self) -> Option<T>;

    /// Like [`ok_log`](Self::ok_log), prefixing the log line with `context`.
    fn ok_log_context(self, context: &str) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }

    fn ok_log_context(self, context: &str) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{context}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_log() {
        let ok: Result<u8, std::io::Error> = Ok(1);
        assert_eq!(ok.ok_log(), Some(1));

        let err: Result<u8, std::io::Error> = Err(std::io::Error::other("boom"));
        assert_eq!(err.ok_log_context("reading value"), None);
    }
}
