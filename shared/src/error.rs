/// Failure of a single AI client round trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Erro de rede: {0}")]
    Network(String),
    /// The service answered with an error; `message` is already user-facing.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("Resposta inválida do servidor: {0}")]
    InvalidResponse(String),
}

/// Everything the wizard can surface to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Por favor, selecione uma imagem primeiro.")]
    NoSourceImage,
    #[error("{0}")]
    Identification(String),
    #[error("Nenhum objeto reconhecível foi encontrado na imagem.")]
    EmptyIdentification,
    #[error("{0}")]
    Segmentation(String),
}

impl WizardError {
    /// Notices the UI should not present as failures.
    pub fn is_informational(&self) -> bool {
        matches!(self, WizardError::EmptyIdentification)
    }
}
