pub(crate) mod plane_launch;
pub(crate) mod plane_list;
pub(crate) mod response_common;
