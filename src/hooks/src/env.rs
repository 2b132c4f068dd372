use boostplus_misc::props;

/// Facts about the device the hooks need, supplied by the host.
pub trait HostEnv: Send + Sync {
    /// Platform API level, 0 when unknown.
    fn sdk_int(&self) -> i32 {
        props::sdk_int().unwrap_or_default()
    }

    /// Real display size in pixels as reported by the display, in its current rotation.
    fn display_size(&self) -> (i32, i32);

    /// Display refresh rate in Hz.
    fn refresh_rate(&self) -> f32;
}

/// Values measured once at attach.
#[derive(Debug, Clone)]
pub struct StaticEnv {
    pub sdk: Option<i32>,
    pub display_size: (i32, i32),
    pub refresh_rate: f32,
}

impl HostEnv for StaticEnv {
    fn sdk_int(&self) -> i32 {
        self.sdk
            .or_else(props::sdk_int)
            .unwrap_or_default()
    }

    fn display_size(&self) -> (i32, i32) {
        self.display_size
    }

    fn refresh_rate(&self) -> f32 {
        self.refresh_rate
    }
}
