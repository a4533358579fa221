//=========================================================================
// Presentation Surface Contract
//=========================================================================
//
// The display the loop presents frames to. Owned by the loop for its
// whole lifetime and disposed exactly once during cleanup.
//
//=========================================================================

//=== PresentationSurface Trait ===========================================

/// Capability interface for the window (or any other output).
pub trait PresentationSurface {
    /// Whether the user or OS asked for the surface to close.
    ///
    /// Queried once per logical step. Implementations may pump pending
    /// platform events here, hence `&mut self`.
    fn should_close(&mut self) -> bool;

    /// Submits the frame the scene just rendered.
    fn present(&mut self) -> anyhow::Result<()>;

    /// Releases the surface. Called once, after the loop stops.
    fn dispose(&mut self) -> anyhow::Result<()>;
}

impl<T: PresentationSurface + ?Sized> PresentationSurface for Box<T> {
    fn should_close(&mut self) -> bool {
        (**self).should_close()
    }

    fn present(&mut self) -> anyhow::Result<()> {
        (**self).present()
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        (**self).dispose()
    }
}
