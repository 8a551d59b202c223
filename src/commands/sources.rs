//! List the registered sources and what each can supply

use serde::Serialize;

use super::common::{print_json, CommandContext};
use crate::{
    select::{supports_operator_breakdown, supports_recent_matches, SourceRegistry},
    Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub name: &'static str,
    pub default: bool,
    pub operator_breakdown: bool,
    pub recent_matches: bool,
}

pub fn describe_sources(registry: &SourceRegistry, default_source: &str) -> Vec<SourceInfo> {
    registry
        .adapters()
        .iter()
        .map(|adapter| SourceInfo {
            name: adapter.name(),
            default: adapter.name().eq_ignore_ascii_case(default_source),
            operator_breakdown: supports_operator_breakdown(adapter),
            recent_matches: supports_recent_matches(adapter),
        })
        .collect()
}

/// Handle the sources command
pub fn handle_sources(ctx: &CommandContext, as_json: bool) -> Result<()> {
    let registry = SourceRegistry::from_settings(&ctx.settings, &ctx.client, None);
    let sources = describe_sources(&registry, &ctx.settings.adapter);

    if as_json {
        return print_json(&sources);
    }

    let mark = |yes: bool| if yes { "yes" } else { "no" };
    for source in &sources {
        println!(
            "{}{}  operators: {}  recent: {}",
            source.name,
            if source.default { " (default)" } else { "" },
            mark(source.operator_breakdown),
            mark(source.recent_matches)
        );
    }
    Ok(())
}
