use {
    crate::Config,
    std::{
        io::IsTerminal,
        panic::PanicHookInfo,
        sync::Once,
    },
    time::macros::format_description,
    tracing::{Metadata, Subscriber},
    tracing_subscriber::{
        EnvFilter,
        Layer,
        fmt::{time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        registry::LookupSpan,
        util::SubscriberInitExt,
    },
};

/// Initializes tracing setup that is shared between the binaries.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    tracing_subscriber::registry().with(fmt_layer(config)).init();
    std::panic::set_hook(Box::new(tracing_panic_hook));
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(config: &Config) {
    // The tracing subscriber below is global object so initializing it again in the
    // same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| initialize(config));
}

fn fmt_layer<S>(config: &Config) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let stderr_threshold = config.stderr_threshold;
    let writer = std::io::stderr
        .with_filter(move |meta: &Metadata<'_>| *meta.level() <= stderr_threshold)
        .or_else(std::io::stdout);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::new(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        )));
    let env_filter = EnvFilter::new(&config.env_filter);

    if config.use_json_format {
        layer.json().with_filter(env_filter).boxed()
    } else {
        layer
            .with_ansi(std::io::stdout().is_terminal())
            .with_filter(env_filter)
            .boxed()
    }
}

/// Panic hook that prints roughly the same message as the default panic hook
/// but uses tracing:error instead of stderr.
fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}

#[cfg(test)]
mod tests {
    use {super::*, tracing::level_filters::LevelFilter};

    #[test]
    fn reentrant_initialization() {
        let config = Config::default()
            .with_env_filter("debug")
            .with_stderr_threshold(LevelFilter::WARN);
        initialize_reentrant(&config);
        initialize_reentrant(&config.with_json_format());
        tracing::info!("still alive");
    }
}
