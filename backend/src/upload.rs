use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use shared::ImageData;
use shared::image::is_accepted_mime_type;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Nenhuma imagem foi enviada.")]
    MissingImage,
    #[error("Formato de imagem não suportado ({0}). Use PNG, JPEG ou WEBP.")]
    UnsupportedFormat(String),
    #[error("A imagem excede o limite de {limit} bytes.")]
    TooLarge { limit: usize },
    #[error("Falha ao ler o envio: {0}")]
    Multipart(String),
}

/// Fields of an `/api/identify` or `/api/segment` form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub image: Option<ImageData>,
    pub label: Option<String>,
}

impl UploadForm {
    pub fn require_image(self) -> Result<(ImageData, Option<String>), UploadError> {
        let image = self.image.ok_or(UploadError::MissingImage)?;
        Ok((image, self.label))
    }
}

pub fn validate_mime_type(mime_type: &str) -> Result<(), UploadError> {
    if is_accepted_mime_type(mime_type) {
        Ok(())
    } else {
        Err(UploadError::UnsupportedFormat(mime_type.to_string()))
    }
}

/// Reads the `image` file field and the optional `label` text field.
/// Unknown fields are drained and ignored.
pub async fn read_upload_form(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadForm, UploadError> {
    let mut form = UploadForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_ascii_lowercase());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
            if data.len() + chunk.len() > max_bytes {
                return Err(UploadError::TooLarge { limit: max_bytes });
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "image" => {
                if data.is_empty() {
                    return Err(UploadError::MissingImage);
                }
                let mime_type = content_type.unwrap_or_else(|| "desconhecido".to_string());
                validate_mime_type(&mime_type)?;
                form.image = Some(ImageData::new(mime_type, data));
            }
            "label" => {
                let label = String::from_utf8(data)
                    .map_err(|e| UploadError::Multipart(e.to_string()))?;
                let label = label.trim();
                if !label.is_empty() {
                    form.label = Some(label.to_string());
                }
            }
            other => log::debug!("Ignoring unexpected form field '{}'", other),
        }
    }

    Ok(form)
}
