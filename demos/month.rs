//! This is an example of how month-planner can be used

use chrono::Local;

use month_planner::client::Client;
use month_planner::label::LabelId;
use month_planner::Calendar;

// TODO: change this value to display another country
const COUNTRY_CODE: &str = "FR";


#[tokio::main]
async fn main() {
    env_logger::init();

    println!("This example fetches the public holidays of the current month, and displays them along with a few tasks.");
    println!("You can set the RUST_LOG environment variable to display more info about the requests.");
    println!("");

    let client = match Client::from_settings() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid holiday service URL: {}", err);
            return;
        },
    };

    let today = Local::now().naive_local().date();
    let mut calendar = Calendar::new(today);

    calendar.load_countries(&client).await;
    calendar.select_country(COUNTRY_CODE);
    calendar.refresh_holidays(&client).await;

    if let Some(id) = calendar.add_task(today) {
        calendar.commit_title(&id, "Water the plants");
    }
    if let Some(id) = calendar.add_task(today) {
        calendar.commit_title(&id, "Fix the fridge door");
        calendar.set_labels(&id, &[LabelId::from("bug"), LabelId::from("urgent"), LabelId::from("in-progress")]);
    }

    month_planner::utils::print_calendar(&calendar);
}
