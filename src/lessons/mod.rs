//! Bundled SQL lessons.
//!
//! Lessons are compiled in as static content and run against the sample
//! database. A lesson is a linear sequence of steps: narrative prose,
//! optionally followed by one example query.

mod content;

/// One step of a lesson: prose, optionally followed by an example query.
#[derive(Debug)]
pub struct LessonStep {
    pub prose: &'static str,
    pub sql: Option<&'static str>,
}

/// A bundled lesson.
#[derive(Debug)]
pub struct Lesson {
    /// 1-based position, used as the short id on the command line.
    pub number: usize,
    pub slug: &'static str,
    pub title: &'static str,
    pub steps: &'static [LessonStep],
}

impl Lesson {
    /// Number of steps that carry an example query.
    pub fn query_count(&self) -> usize {
        self.steps.iter().filter(|s| s.sql.is_some()).count()
    }
}

/// Returns all bundled lessons in course order.
pub fn all() -> &'static [Lesson] {
    content::LESSONS
}

/// Finds a lesson by number ("2") or slug ("where-filtering").
pub fn find(key: &str) -> Option<&'static Lesson> {
    if let Ok(number) = key.parse::<usize>() {
        return all().iter().find(|l| l.number == number);
    }
    all().iter().find(|l| l.slug == key)
}
