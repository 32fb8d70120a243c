//! Host-memory texture backend
//!
//! Stands in for a real graphics device: plane textures are byte vectors
//! addressed by id. Used by unit tests and headless runs to exercise the
//! full upload path, including creation failure and release accounting.

use crate::backend::{BackendError, PlaneChannelFormat, TextureBackend};
use vidtex_format::PlaneDescriptor;

/// Id-addressed plane texture owned by a [`SoftwareBackend`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftwareTexture {
    id: u64,
}

struct Slot {
    desc: PlaneDescriptor,
    channels: PlaneChannelFormat,
    data: Vec<u8>,
}

/// In-memory backend with creation/destruction accounting
#[derive(Default)]
pub struct SoftwareBackend {
    slots: Vec<Option<Slot>>,
    created: u64,
    destroyed: u64,
    max_live: Option<usize>,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail creation once this many textures are alive
    ///
    /// Lets tests provoke the native-API failure path deterministically.
    pub fn with_max_live(max_live: usize) -> Self {
        Self {
            max_live: Some(max_live),
            ..Self::default()
        }
    }

    /// Total textures ever created
    pub fn created_count(&self) -> u64 {
        self.created
    }

    /// Total textures destroyed
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }

    /// Currently live textures
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Pixel bytes last uploaded into a texture
    pub fn texture_bytes(&self, texture: &SoftwareTexture) -> Option<&[u8]> {
        self.slots
            .get(texture.id as usize)
            .and_then(Option::as_ref)
            .map(|slot| slot.data.as_slice())
    }

    /// Channel layout a texture was created with
    pub fn texture_channels(&self, texture: &SoftwareTexture) -> Option<PlaneChannelFormat> {
        self.slots
            .get(texture.id as usize)
            .and_then(Option::as_ref)
            .map(|slot| slot.channels)
    }
}

impl TextureBackend for SoftwareBackend {
    type Texture = SoftwareTexture;

    fn create_texture(
        &mut self,
        desc: &PlaneDescriptor,
        channels: PlaneChannelFormat,
    ) -> Result<SoftwareTexture, BackendError> {
        if let Some(max_live) = self.max_live {
            if self.live_count() >= max_live {
                return Err(BackendError::TextureCreation(format!(
                    "texture budget of {} exhausted",
                    max_live
                )));
            }
        }

        let id = self.slots.len() as u64;
        self.slots.push(Some(Slot {
            desc: *desc,
            channels,
            data: vec![0; desc.size_in_bytes()],
        }));
        self.created += 1;
        Ok(SoftwareTexture { id })
    }

    fn upload_texture(
        &mut self,
        texture: &mut SoftwareTexture,
        desc: &PlaneDescriptor,
        data: &[u8],
    ) -> Result<(), BackendError> {
        let slot = self
            .slots
            .get_mut(texture.id as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| BackendError::Upload(format!("texture {} is dead", texture.id)))?;

        if slot.desc != *desc || data.len() != desc.size_in_bytes() {
            return Err(BackendError::Upload(format!(
                "upload of {} bytes does not match texture layout {:?}",
                data.len(),
                slot.desc
            )));
        }

        slot.data.copy_from_slice(data);
        Ok(())
    }

    fn destroy_texture(&mut self, texture: SoftwareTexture) {
        if let Some(slot) = self.slots.get_mut(texture.id as usize) {
            if slot.take().is_some() {
                self.destroyed += 1;
            }
        }
    }

    fn texture_id(&self, texture: &SoftwareTexture) -> u64 {
        texture.id
    }
}
