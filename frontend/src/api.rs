use gloo_file::{Blob, File as GlooFile, ObjectUrl};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AiClient, ClientError, ErrorResponse, IdentifyResponse, ImageData, SegmentResponse,
    SegmentedImage,
};
use web_sys::FormData;

/// [`AiClient`] backed by the server's `/api/identify` and `/api/segment`.
///
/// The image is uploaded as multipart form data; a segmented result comes
/// back as base64 and is turned into an object URL owned by the caller.
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Client for the server that delivered the page.
    pub fn for_current_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();
        log::info!("Using backend at '{}'", origin);
        Self::new(origin)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: FormData) -> Result<T, ClientError> {
        let request = Request::post(&self.endpoint(path))
            .body(form)
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        read_json(response).await
    }
}

impl AiClient for BackendClient {
    type Image = GlooFile;
    type Resource = ObjectUrl;

    async fn identify_objects(&self, image: &GlooFile) -> Result<Vec<String>, ClientError> {
        let form = image_form(image)?;
        let body: IdentifyResponse = self.post_form("/api/identify", form).await?;
        Ok(body.objects)
    }

    async fn segment_object(
        &self,
        image: &GlooFile,
        label: &str,
    ) -> Result<SegmentedImage<ObjectUrl>, ClientError> {
        let form = image_form(image)?;
        form.append_with_str("label", label)
            .map_err(|e| ClientError::Network(format!("{:?}", e)))?;

        let body: SegmentResponse = self.post_form("/api/segment", form).await?;
        let image = ImageData::from_base64(body.mime_type, &body.data)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        let blob = Blob::new_with_options(image.bytes.as_slice(), Some(&image.mime_type));
        Ok(SegmentedImage::new(image.mime_type, ObjectUrl::from(blob)))
    }
}

fn image_form(image: &GlooFile) -> Result<FormData, ClientError> {
    let form = FormData::new().map_err(|e| ClientError::Network(format!("{:?}", e)))?;
    form.append_with_blob_and_filename("image", image.as_ref(), &image.name())
        .map_err(|e| ClientError::Network(format!("{:?}", e)))?;
    Ok(form)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()));
    }

    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("Erro do servidor: {}", status),
    };
    log::error!("Server error {}: {}", status, message);
    Err(ClientError::Service { status, message })
}
