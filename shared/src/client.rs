use crate::error::ClientError;
use crate::image::SegmentedImage;

/// Remote recognition and segmentation behind a fixed contract.
///
/// Each call is a single best-effort round trip; implementations do not
/// retry or cache. The futures are not required to be `Send` since the
/// wizard runs on a single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait AiClient {
    /// Handle of an uploaded image.
    type Image: Clone;
    /// Locally addressable image resource produced from a remote reply.
    type Resource;

    /// Labels of the principal objects in `image`, in service order.
    /// An empty list is a valid answer.
    async fn identify_objects(&self, image: &Self::Image) -> Result<Vec<String>, ClientError>;

    /// `label` isolated on a blank background.
    async fn segment_object(
        &self,
        image: &Self::Image,
        label: &str,
    ) -> Result<SegmentedImage<Self::Resource>, ClientError>;
}
