//! Administrative subcommands operating directly on the store.

use anyhow::Context as _;
use matchup_core::{
  item::NewItem,
  matchup::{MatchupStatus, NewMatchup},
  store::MatchupStore,
  tally,
  week::WeekStart,
};
use matchup_store_sqlite::SqliteStore;

pub async fn add_item(
  store: &SqliteStore,
  item_id: String,
  title: Option<String>,
  image_url: Option<String>,
) -> anyhow::Result<()> {
  let item = store
    .add_item(NewItem { item_id, title, image_url })
    .await
    .context("failed to add item")?;
  println!("added item {}", item.item_id);
  Ok(())
}

pub async fn create(
  store: &SqliteStore,
  week_start: WeekStart,
  option_a_ref: Option<String>,
  option_b_ref: Option<String>,
  activate: bool,
) -> anyhow::Result<()> {
  let matchup = store
    .create_matchup(NewMatchup {
      week_start,
      option_a_ref,
      option_b_ref,
      activate,
    })
    .await
    .with_context(|| format!("failed to create matchup for {week_start}"))?;
  tracing::info!(week = %matchup.week_start, status = %matchup.status, "matchup created");
  println!("{} {} {}", matchup.week_start, matchup.status, matchup.matchup_id);
  Ok(())
}

pub async fn set_options(
  store: &SqliteStore,
  week_start: WeekStart,
  option_a_ref: String,
  option_b_ref: String,
) -> anyhow::Result<()> {
  store
    .set_options(week_start, option_a_ref, option_b_ref)
    .await
    .with_context(|| format!("failed to set options for {week_start}"))?;
  println!("updated {week_start}");
  Ok(())
}

pub async fn set_status(
  store: &SqliteStore,
  week_start: WeekStart,
  status: MatchupStatus,
) -> anyhow::Result<()> {
  let matchup = store
    .set_status(week_start, status)
    .await
    .with_context(|| format!("failed to mark {week_start} {status}"))?;
  tracing::info!(week = %matchup.week_start, status = %matchup.status, "matchup status changed");
  println!("{} {}", matchup.week_start, matchup.status);
  Ok(())
}

pub async fn list(store: &SqliteStore) -> anyhow::Result<()> {
  for matchup in store.list_matchups().await.context("failed to list matchups")? {
    let totals = tally::totals(store, matchup.week_start).await?;
    println!(
      "{}  {:<7}  a={:<16} b={:<16} votes a:{} b:{}",
      matchup.week_start,
      matchup.status,
      matchup.option_a_ref.as_deref().unwrap_or("-"),
      matchup.option_b_ref.as_deref().unwrap_or("-"),
      totals.a,
      totals.b,
    );
  }
  Ok(())
}

pub async fn results(store: &SqliteStore, week_start: Option<WeekStart>) -> anyhow::Result<()> {
  let Some(week_start) = week_start else {
    match tally::last_closed_result(store).await? {
      Some(result) => println!(
        "{} a:{} b:{} winner:{}",
        result.week_start,
        result.totals.a,
        result.totals.b,
        result.winner,
      ),
      None => println!("no closed weeks"),
    }
    return Ok(());
  };

  let matchup = store
    .get_matchup(week_start)
    .await?
    .with_context(|| format!("no matchup for {week_start}"))?;
  let totals = tally::totals(store, week_start).await?;
  if matchup.status == MatchupStatus::Closed {
    println!(
      "{week_start} a:{} b:{} winner:{}",
      totals.a,
      totals.b,
      totals.winner()
    );
  } else {
    println!("{week_start} ({}) a:{} b:{}", matchup.status, totals.a, totals.b);
  }
  Ok(())
}
