/// Switches for two legacy behaviours of resize and save. Both are on by default so
/// resized boards and saved files match earlier releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compat {
    /// When only one axis grows, crop both axes to the new size, losing the growing
    /// axis' margin. Off: every axis is grown or cropped on its own.
    pub crop_mixed_resize: bool,
    /// Save only cells of age 1 as alive. Off: every living cell is saved.
    pub save_newborn_only: bool,
}

impl Compat {
    #[inline]
    pub fn legacy() -> Self {
        Compat {
            crop_mixed_resize: true,
            save_newborn_only: true,
        }
    }

    #[inline]
    pub fn fixed() -> Self {
        Compat {
            crop_mixed_resize: false,
            save_newborn_only: false,
        }
    }
}

impl Default for Compat {
    fn default() -> Self {
        Self::legacy()
    }
}
