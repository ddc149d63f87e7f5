//! Object-URL media factory backed by `URL.createObjectURL`.

use tab_host::{BlobPayload, MediaKind, MediaUrlFactory, TransientMedia};

#[derive(Debug, Clone, Copy, Default)]
/// Browser media factory minting revocable object URLs for blob payloads.
pub struct WebMediaUrlFactory;

impl MediaUrlFactory for WebMediaUrlFactory {
    fn create_media(&self, payload: &BlobPayload) -> Result<TransientMedia, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let bytes = js_sys::Uint8Array::from(&payload.bytes[..]);
            let parts = js_sys::Array::of1(&bytes.into());
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(&payload.content_type);
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|err| format!("media blob build failed: {err:?}"))?;
            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|err| format!("object URL creation failed: {err:?}"))?;

            Ok(TransientMedia::new(
                url,
                MediaKind::from_content_type(&payload.content_type),
                |url| {
                    let _ = web_sys::Url::revoke_object_url(url);
                },
            ))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = payload;
            Err(crate::interop::WASM_ONLY_ERR.to_string())
        }
    }
}
