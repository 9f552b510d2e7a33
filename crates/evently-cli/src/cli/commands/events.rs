//! Event command handlers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use evently_core::api::{ApiClient, Event, FilePart};
use evently_core::events::{COVER_IMAGE_FIELD, EventDraft, EventType, display_date, filter_events};

pub async fn list(client: &ApiClient, search: Option<&str>) -> Result<()> {
    let events = client.list_events().await.context("list events")?;
    let shown = filter_events(&events, search.unwrap_or_default());
    if shown.is_empty() {
        println!("No events found.");
        return Ok(());
    }
    for event in shown {
        println!(
            "{}  {}  {}  {}",
            event.id,
            display_date(&event.date),
            event.name,
            event.address
        );
    }
    Ok(())
}

pub async fn show(client: &ApiClient, id: &str) -> Result<()> {
    let event = match client.get_event(id).await {
        Ok(event) => event,
        Err(e) if e.is_not_found() => anyhow::bail!("Event '{id}' not found"),
        Err(e) => return Err(e).with_context(|| format!("load event '{id}'")),
    };
    print_event(&event)
}

fn print_event(event: &Event) -> Result<()> {
    println!("{}", event.name);
    println!("  id:      {}", event.id);
    println!("  date:    {}", display_date(&event.date));
    println!("  address: {}", event.address);
    if !event.access.is_empty() {
        println!("  access:  {}", event.access);
    }
    if !event.extra.is_empty() {
        let extra = serde_json::to_string_pretty(&event.extra).context("format event")?;
        println!("{extra}");
    }
    Ok(())
}

pub struct CreateArgs {
    pub name: String,
    pub address: String,
    pub date: String,
    pub time: String,
    pub event_type: Option<EventType>,
    pub online: bool,
    pub cover: Option<PathBuf>,
}

pub async fn create(client: &ApiClient, args: CreateArgs) -> Result<()> {
    let cover_image = match &args.cover {
        Some(path) => Some(FilePart::read(COVER_IMAGE_FIELD, path).await?),
        None => None,
    };
    let draft = EventDraft {
        name: args.name,
        address: args.address,
        date: args.date,
        time: args.time,
        event_type: args.event_type,
        online_sync: args.online,
        cover_image,
    };

    let created = client
        .create_event(draft.to_form())
        .await
        .context("create event")?;
    match created.id {
        Some(id) => println!("Event created successfully ({id})"),
        None => println!("Event created successfully"),
    }
    Ok(())
}
