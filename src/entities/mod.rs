pub mod attachment;
pub mod film;
pub mod film_genre;
pub mod genre;

pub use attachment::AttachmentKind;
