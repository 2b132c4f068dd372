/// Checks the `debug.boostplus.<key>` system property, always `false` in release builds.
#[macro_export]
macro_rules! debug_on {
    ($key: expr) => {{
        #[cfg(debug_assertions)]
        {
            $crate::props::prop_on(concat!("debug.boostplus.", $key))
        }
        #[cfg(not(debug_assertions))]
        {
            false
        }
    }};
}
