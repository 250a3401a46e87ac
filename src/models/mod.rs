pub mod difficulty;
pub mod scheduler;
pub mod study_session;
pub mod word;
pub mod word_list;

pub use difficulty::Difficulty;
pub use study_session::{DEFAULT_SESSION_LIMIT, StudySession, StudyStats};
pub use word::VocabularyWord;
pub use word_list::VocabularyList;
