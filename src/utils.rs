//! Some utility functions

use crate::calendar::Calendar;
use crate::label;
use crate::Task;

/// A debug utility that pretty-prints the month view of a calendar
pub fn print_calendar(calendar: &Calendar) {
    println!("==== {} ({}) ====", calendar.month_title(), calendar.selected_country());
    for cell in calendar.cells() {
        let marker = if cell.is_current_month { " " } else { "." };
        println!("{}{}", marker, cell.date.format("%a %Y-%m-%d"));

        let holidays = calendar.cell_holidays(cell.date);
        if holidays.is_loading() {
            println!("    (loading holidays...)");
        }
        for holiday in holidays.holidays() {
            println!("    * {}\t{}", holiday.name, calendar.holiday_origin(holiday));
        }

        for task in calendar.visible_tasks(&cell.tasks) {
            print_task(task);
        }
    }
}

pub fn print_task(task: &Task) {
    let labels: Vec<String> = task.labels().iter()
        .filter_map(label::find)
        .map(|l| format!("{} {}", l.name(), l.color().to_hex_string()))
        .collect();
    let density = if task.is_labels_minimized() { "-" } else { "+" };
    println!("    {} #{} {}\t[{}]\t{}", density, task.order(), task.title(), labels.join(", "), task.id());
}
