mod attachment;
mod film;
mod genre;

pub use attachment::AttachmentRepository;
pub use film::FilmRepository;
pub use genre::GenreRepository;
