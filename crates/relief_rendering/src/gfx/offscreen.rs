//! Scoped offscreen render targets.
//!
//! An [`OffscreenTexture`] borrows the device for its whole lifetime and
//! gives its resources back on drop, on every exit path. The color texture
//! survives only if it was moved out with [`OffscreenTexture::into_texture`].

use super::device::{FramebufferId, GraphicsDevice, Size, Texture};
use crate::error::{GfxError, GfxResult};

/// An offscreen color target scoped to one borrow of the device.
pub struct OffscreenTexture<'d, D: GraphicsDevice + ?Sized> {
    device: &'d mut D,
    framebuffer: FramebufferId,
    size: Size,
    texture: Option<Texture>,
}

impl<'d, D: GraphicsDevice + ?Sized> OffscreenTexture<'d, D> {
    /// Acquires a target of the given size.
    ///
    /// # Errors
    /// Returns the device error if the target cannot be created.
    pub fn new(device: &'d mut D, size: Size) -> GfxResult<Self> {
        let target = device.create_offscreen_target(size)?;
        Ok(Self {
            device,
            framebuffer: target.framebuffer,
            size,
            texture: Some(target.texture),
        })
    }

    /// Makes this target the destination of subsequent draws.
    ///
    /// # Errors
    /// Returns the device error if binding fails.
    pub fn bind(&mut self) -> GfxResult<()> {
        self.device.bind_framebuffer(self.framebuffer, self.size)
    }

    /// Target size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The borrowed device, for drawing into the target.
    pub fn device(&mut self) -> &mut D {
        &mut *self.device
    }

    /// Moves the color texture out and releases the framebuffer.
    ///
    /// # Errors
    /// Fails only if the texture was already taken.
    pub fn into_texture(mut self) -> GfxResult<Texture> {
        self.texture
            .take()
            .ok_or_else(|| GfxError::OffscreenTarget("color texture already moved out".to_owned()))
    }
}

impl<D: GraphicsDevice + ?Sized> Drop for OffscreenTexture<'_, D> {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.device.release_texture(texture);
        }
        self.device.release_framebuffer(self.framebuffer);
    }
}
