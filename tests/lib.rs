mod arith;
mod fmt;
mod timeline;

/// A type alias we use for tests.
///
/// Most tests here build durations from strings, and the `?` operator keeps
/// them short.
type Result = std::result::Result<(), tenor::Error>;

/// Enables log output when the `logging` feature is on and `RUST_LOG` is set.
fn init() {
    let _ = env_logger::try_init();
}
