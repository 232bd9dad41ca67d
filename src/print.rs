use colored::Colorize;
use repz::model::{Exercise, LoggedWorkout, WorkoutTemplate};

pub(crate) fn success(msg: &str) {
    println!("{}", msg.green());
}

pub(crate) fn info(msg: &str) {
    println!("{}", msg.dimmed());
}

pub(crate) fn warn(msg: &str) {
    println!("{}", msg.yellow());
}

pub(crate) fn error(msg: &str) {
    println!("{}", msg.red());
}

pub(crate) fn print_templates(templates: &[WorkoutTemplate]) {
    if templates.is_empty() {
        println!("No templates.");
        return;
    }
    for t in templates {
        println!(
            "{}  {} ({} exercises)",
            t.id.yellow(),
            t.name.bold(),
            t.exercises.len()
        );
    }
}

pub(crate) fn print_template(t: &WorkoutTemplate) {
    println!("{} {}", t.id.yellow(), t.name.bold());
    if let Some(desc) = &t.description {
        println!("{}", desc.dimmed());
    }
    println!("--------------------------------");
    for ex in &t.exercises {
        print_exercise(ex);
    }
}

pub(crate) fn print_logs(logs: &[LoggedWorkout]) {
    if logs.is_empty() {
        println!("No logged workouts.");
        return;
    }
    for l in logs {
        let label = l.template_name.as_deref().unwrap_or("(freestyle)");
        println!(
            "{}  {}  {} ({} exercises)",
            l.date.to_string().cyan(),
            l.id.yellow(),
            label.bold(),
            l.exercises.len()
        );
    }
}

pub(crate) fn print_log(l: &LoggedWorkout) {
    let label = l.template_name.as_deref().unwrap_or("(freestyle)");
    println!("{}  {}  {}", l.date.to_string().cyan(), l.id.yellow(), label.bold());
    if let Some(minutes) = l.duration {
        println!("Duration: {} min", minutes);
    }
    if let Some(notes) = &l.notes {
        println!("{}", notes.dimmed());
    }
    println!("--------------------------------");
    for ex in &l.exercises {
        print_exercise(ex);
    }
}

fn print_exercise(ex: &Exercise) {
    let sets = ex
        .set_details
        .iter()
        .map(|s| match (s.reps, s.weight) {
            (Some(r), Some(w)) => format!("{}x{}kg", r, w),
            (Some(r), None) => format!("{} reps", r),
            (None, Some(w)) => format!("{}kg", w),
            (None, None) => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");

    if sets.is_empty() {
        match ex.duration {
            Some(secs) => println!("  {}  {}s", ex.name, secs),
            None => println!("  {}", ex.name),
        }
    } else {
        println!("  {}  [{}]", ex.name, sets);
    }
}
