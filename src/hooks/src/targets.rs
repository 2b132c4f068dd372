/// Class names of one flavour of the streaming client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetApp {
    pub package: String,
    pub stream_activity: String,
    pub start_activity: String,
}

const PACKAGE_PREFIX: &str = "com.boosteroid";
const TV_PACKAGE: &str = "com.boosteroidtv.streaming";

impl TargetApp {
    /// Target description for a loaded package, `None` for packages we leave alone.
    pub fn for_package(package: &str) -> Option<Self> {
        if !package.starts_with(PACKAGE_PREFIX) {
            return None;
        }

        let (stream_activity, start_activity) = if package == TV_PACKAGE {
            (
                "com.boosteroidtv.streaming.UI.tv.StreamActivity",
                "com.boosteroidtv.streaming.UI.tv.StartActivity",
            )
        } else {
            (
                "com.boosteroid.streaming.UI.StreamActivity",
                "com.boosteroid.streaming.UI.StartActivity",
            )
        };

        Some(Self {
            package: package.into(),
            stream_activity: stream_activity.into(),
            start_activity: start_activity.into(),
        })
    }

    pub fn params_model(&self) -> String {
        format!("{}.network.wss.model.ParamsModel", self.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_and_tv_flavours() {
        let phone = TargetApp::for_package("com.boosteroid.streaming").unwrap();
        assert_eq!(phone.stream_activity, "com.boosteroid.streaming.UI.StreamActivity");
        assert_eq!(
            phone.params_model(),
            "com.boosteroid.streaming.network.wss.model.ParamsModel"
        );

        let tv = TargetApp::for_package(TV_PACKAGE).unwrap();
        assert_eq!(tv.start_activity, "com.boosteroidtv.streaming.UI.tv.StartActivity");
        assert_eq!(
            tv.params_model(),
            "com.boosteroidtv.streaming.network.wss.model.ParamsModel"
        );
    }

    #[test]
    fn other_packages_are_ignored() {
        assert_eq!(TargetApp::for_package("com.android.systemui"), None);
        assert_eq!(TargetApp::for_package("dev.boostplus"), None);
    }
}
