mod pagination;
mod result;
mod traits;
mod wire;

pub use pagination::{PageDescriptor, ProfilePage, DEFAULT_PAGE_SIZE};
pub use result::{http_status_message, ApiResult};
pub use traits::{Operation, ProfileService};
pub use wire::{DeleteResponse, ErrorBody, ListBody, ListResponse, ServerPagination};
