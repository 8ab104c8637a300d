pub mod macro_support {
    pub use tracing::level_filters::LevelFilter;
    pub use serde_json::Value;
    pub use tracing_subscriber;
    pub use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
}

#[macro_export]
macro_rules! assert_error {
    ($res:expr, $error:expr) => {{
        assert_eq!($res.status(), $error.status());

        let res_json: $crate::macro_support::Value = $res.json().await;
        assert_eq!(res_json["error"]["code"], $error.code());
    }};
}

#[macro_export]
macro_rules! enable_logging {
    ($level:ident) => {{
        use $crate::macro_support::{
            EnvFilter, Layer, LevelFilter, SubscriberExt, SubscriberInitExt,
        };

        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::$level.into())
            .from_env_lossy();

        let _ = $crate::macro_support::tracing_subscriber::registry()
            .with(
                $crate::macro_support::tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_line_number(true)
                    .with_filter(env_filter),
            )
            .try_init();
    }};
}
