pub mod helix;
pub mod live;

pub use helix::{
    FollowsResponse, HelixFollow, HelixStream, HelixUser, Pagination, StreamsResponse,
    UsersResponse,
};
pub use live::LiveChannel;
