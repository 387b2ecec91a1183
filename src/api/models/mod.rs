// Models module - contains the Review entity and its request/response shapes

pub mod review;

pub use review::{
    CreateReviewResponse, DEFAULT_RESTAURANT, ErrorResponse, MessageResponse, NewReview, Rating,
    Review, ReviewChanges, ReviewDocument, ReviewFields, ReviewListResponse,
};
