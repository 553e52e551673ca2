//! Subcommand execution. Results are written to `out` as pretty JSON.

use std::{
  io::{Read, Write},
  path::Path,
};

use anyhow::{Context, Result, bail};
use opengin_core::{entity::Entity, gateway::EntityGateway, kind::KindEntry};
use serde::Serialize;

use crate::Command;

pub async fn run<G, W>(gateway: &G, command: Command, out: &mut W) -> Result<()>
where
  G: EntityGateway,
  W: Write,
{
  match command {
    Command::List { detailed: true } => {
      let listing = gateway.list_detailed().await;
      #[derive(Serialize)]
      struct Detailed<'a> {
        degraded: bool,
        #[serde(flatten)]
        listing:  &'a opengin_core::gateway::Listing,
      }
      print_json(out, &Detailed { degraded: listing.degraded(), listing: &listing })
    }
    Command::List { detailed: false } => print_json(out, &gateway.list().await),
    Command::Get { id } => {
      let lookup = gateway.lookup(&id).await;
      if lookup.is_degraded() {
        tracing::warn!(%id, "backend unavailable; result comes from fallback data");
      }
      match lookup.into_option() {
        Some(entity) => print_json(out, &entity),
        None => bail!("entity {id} not found"),
      }
    }
    Command::Create { file } => {
      let entity = read_entity(&file)?;
      let created = gateway.create(&entity).await.context("create failed")?;
      print_json(out, &created)
    }
    Command::Update { file } => {
      let entity = read_entity(&file)?;
      let updated = gateway.update(&entity).await.context("update failed")?;
      print_json(out, &updated)
    }
    Command::Kinds => {
      let entries: Vec<_> = gateway
        .kinds()?
        .into_iter()
        .map(|(major, minors)| KindEntry { major, minors })
        .collect();
      print_json(out, &entries)
    }
  }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
  serde_json::to_writer_pretty(&mut *out, value).context("writing output")?;
  writeln!(out).context("writing output")?;
  Ok(())
}

/// Parse an entity from `path`, or from stdin when `path` is `-`.
fn read_entity(path: &Path) -> Result<Entity> {
  let raw = if path == Path::new("-") {
    let mut buf = String::new();
    std::io::stdin()
      .read_to_string(&mut buf)
      .context("reading entity from stdin")?;
    buf
  } else {
    std::fs::read_to_string(path)
      .with_context(|| format!("reading entity file {}", path.display()))?
  };
  serde_json::from_str(&raw).context("parsing entity JSON")
}
