use super::http_response::{plane_launch, plane_list};

pub(crate) mod plane_launch_post;
pub(crate) mod plane_list_get;
pub(crate) mod request_common;
