use vocab_study::database::db;
use vocab_study::models::{
    DEFAULT_SESSION_LIMIT, Difficulty, StudySession, StudyStats, VocabularyList, VocabularyWord,
};

use rusqlite::Connection;
use std::io::{self, BufRead, Write};

fn seed_sample_data(conn: &Connection) -> vocab_study::Result<()> {
    let now = db::get_current_date(conn)?;
    let list = VocabularyList::new("japanese-basics", "Japanese Basics", now);
    db::new_list(&list, conn)?;

    let samples = [
        ("inu", "犬", "dog"),
        ("neko", "猫", "cat"),
        ("mizu", "水", "water"),
        ("arigatou", "ありがとう", "thank you"),
    ];
    for (id, term, definition) in samples {
        let word = VocabularyWord::new(id, &list.id, term, definition, Difficulty::Medium);
        db::add_word(&word, conn)?;
    }

    println!("Sample data created!");
    Ok(())
}

fn print_stats(conn: &Connection) -> vocab_study::Result<()> {
    let words = db::get_all_words(conn)?;
    let now = db::get_current_date(conn)?;
    let stats = StudyStats::compute(&words, now);

    println!(
        "{} words | {} due | {} difficult | {} mastered (date: {})",
        stats.total,
        stats.due,
        stats.difficult,
        stats.mastered,
        now.format("%Y-%m-%d")
    );
    Ok(())
}

fn build_session(conn: &Connection) -> vocab_study::Result<StudySession> {
    let words = db::get_all_words(conn)?;
    let now = db::get_current_date(conn)?;

    let session = StudySession::start(&words, now, DEFAULT_SESSION_LIMIT);
    if session.total_count() > 0 {
        return Ok(session);
    }

    // Nothing due: fall back to reviewing the difficult words.
    let fallback = StudySession::start_difficult(&words, DEFAULT_SESSION_LIMIT);
    if fallback.total_count() > 0 {
        println!("Nothing due right now - reviewing difficult words instead.");
    }
    Ok(fallback)
}

fn run_study_loop(conn: &Connection) -> vocab_study::Result<()> {
    let mut session = build_session(conn)?;
    if session.total_count() == 0 {
        println!("Nothing to study. Come back later or add more words.");
        return Ok(());
    }

    println!("Commands: f = flip, e/m/h = grade easy/medium/hard, s = skip, d = next day, q = quit");

    let stdin = io::stdin();
    loop {
        if session.is_finished() {
            println!("Session complete: {} words reviewed.", session.completed_count());
            print_stats(conn)?;
            return Ok(());
        }

        let word = session.current_word().unwrap();
        if session.showing_definition() {
            println!("[{}] {} = {}", session.progress_message(), word.term, word.definition);
        } else {
            println!("[{}] {}", session.progress_message(), word.term);
        }
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match line.trim() {
            "f" | "" => session.toggle_definition(),
            "e" | "m" | "h" => {
                let difficulty = match line.trim() {
                    "e" => Difficulty::Easy,
                    "m" => Difficulty::Medium,
                    _ => Difficulty::Hard,
                };
                let now = db::get_current_date(conn)?;
                if let Some(updated) = session.grade_current(difficulty, now) {
                    // Persist before the next select/prioritize cycle reads it.
                    db::update_word(&updated, conn)?;
                }
            }
            "s" => session.skip_current(),
            "d" => {
                db::advance_day(conn)?;
                print_stats(conn)?;
                session = build_session(conn)?;
            }
            "q" => return Ok(()),
            other => println!("Unknown command '{other}'"),
        }
    }
}

fn main() -> vocab_study::Result<()> {
    let conn = db::init_database("vocab.sqlite3")?;

    if db::get_all_lists(&conn)?.is_empty() {
        seed_sample_data(&conn)?;
    }

    print_stats(&conn)?;
    run_study_loop(&conn)
}
