use crate::keys::PolicyKey;
use crate::store::PolicyStore;

/// Index meaning "nothing selected, keep native behavior".
pub const NO_SELECTION: i32 = -1;

// Effective values as the hooks see them. Each call re-reads the medium, and every
// override is gated on the master switch.
impl PolicyStore {
    pub fn enabled(&self) -> bool {
        self.get_bool(PolicyKey::Enabled, false)
    }

    pub fn unlock_frame_rate(&self) -> bool {
        self.enabled() && self.get_bool(PolicyKey::UnlockFrameRate, false)
    }

    pub fn unlock_bitrate(&self) -> bool {
        self.enabled() && self.get_bool(PolicyKey::UnlockBitrate, false)
    }

    pub fn extend_into_notch(&self) -> bool {
        self.enabled() && self.get_bool(PolicyKey::ExtendIntoNotch, true)
    }

    pub fn resolution_index(&self) -> i32 {
        if self.enabled() {
            self.get_int(PolicyKey::Resolution, 0)
        } else {
            NO_SELECTION
        }
    }

    pub fn aspect_ratio_index(&self) -> i32 {
        if self.enabled() {
            self.get_int(PolicyKey::AspectRatio, NO_SELECTION)
        } else {
            NO_SELECTION
        }
    }
}
