use core::error::Error;
use core::fmt::Debug;
use core::fmt::Display;

/// The catch-all error type of the trsconv tools.
///
/// Any type implementing [`Error`] converts into it through the blanket
/// [`From`] impl, so `?` works across crate boundaries. A backtrace is
/// captured on construction and shown by the [`Debug`] output when
/// `RUST_BACKTRACE` is set.
pub struct TrsconvError {
    inner: Box<InnerTrsconvError>,
}

impl TrsconvError {
    /// Attempts to downcast the underlying error to the given type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.error.downcast_ref::<E>()
    }
}

/// Keeps [`TrsconvError`] a thin pointer, so that `Result<T, TrsconvError>`
/// stays small on the happy path.
struct InnerTrsconvError {
    error: Box<dyn Error + Send + Sync + 'static>,
    backtrace: std::backtrace::Backtrace,
}

// NOTE: writing the impl this way gives us From<&str> and From<String>
impl<E> From<E> for TrsconvError
where
    Box<dyn Error + Send + Sync + 'static>: From<E>,
{
    #[cold]
    fn from(error: E) -> Self {
        TrsconvError {
            inner: Box::new(InnerTrsconvError {
                error: error.into(),
                backtrace: std::backtrace::Backtrace::capture(),
            }),
        }
    }
}

impl Display for TrsconvError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.inner.error)
    }
}

impl Debug for TrsconvError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", self.inner.error)?;

        let backtrace = &self.inner.backtrace;
        if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
            writeln!(f, "{backtrace}")?;
        }

        Ok(())
    }
}
