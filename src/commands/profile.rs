//! Profile commands
//!
//! `profile info` and `profile user` render a sectioned report; the other
//! profile subcommands print the raw JSON response.

use std::collections::HashSet;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{parse_json, CommandError, Context};
use crate::cli::{ProfileArgs, ProfileCommand};
use crate::client::{RequestDescriptor, Transport};
use crate::data::item::{lookup_item_name, Item};
use crate::data::profile::{FarmPlot, Profile};
use crate::format::{elapsed_since, epoch_millis_to_rfc3339, format_price, remaining_until};
use crate::render::{print_json, SectionWriter};

pub(super) async fn run<T: Transport, W: Write>(
    command: &ProfileCommand,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    let (kind, id) = match command {
        ProfileCommand::Info(args) => return show_profile("profile", args, ctx, out).await,
        ProfileCommand::User(args) => return show_profile("user", args, ctx, out).await,
        ProfileCommand::Inventory { id } => ("inventory", id),
        ProfileCommand::Flatinventory { id } => ("flatInventory", id),
        ProfileCommand::Stats { id } => ("stats", id),
        ProfileCommand::Trophies { id } => ("trophies", id),
    };
    ctx.print_raw(&RequestDescriptor::new(kind).param("id", *id), out)
        .await
}

async fn show_profile<T: Transport, W: Write>(
    kind: &str,
    args: &ProfileArgs,
    ctx: &Context<T>,
    out: &mut W,
) -> Result<(), CommandError> {
    let request = RequestDescriptor::new(kind).param("id", args.id);
    let bytes = ctx.fetcher.fetch(&request).await?;
    if args.debug {
        print_json(out, &bytes)?;
        return Ok(());
    }

    let profile: Profile = parse_json(&bytes, "profile info")?;
    let sections = SectionFilter::parse(args.filter.as_deref());
    let farm_sort = args.sort.as_deref().and_then(FarmSort::parse);

    // Item names are only shown in the farm and quest sections
    let items = if sections.wants("farms") || sections.wants("quests") {
        ctx.load_items(true).await?
    } else {
        Vec::new()
    };

    render_profile(&profile, &items, &sections, farm_sort, ctx.now, out)?;
    Ok(())
}

/// Set of lowercase section names to render; empty means all sections
#[derive(Debug, Default)]
struct SectionFilter(HashSet<String>);

impl SectionFilter {
    fn parse(raw: Option<&str>) -> Self {
        let names = raw
            .unwrap_or_default()
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self(names)
    }

    fn wants(&self, section: &str) -> bool {
        self.0.is_empty() || self.0.contains(section)
    }
}

/// Farm plot orderings selected with `--sort farm:<key>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FarmSort {
    Plant,
    Level,
}

impl FarmSort {
    /// Parses `farm:plant`, `farm:item` or `farm:level`; anything else is ignored
    fn parse(raw: &str) -> Option<Self> {
        let (section, key) = raw.split_once(':')?;
        if !section.eq_ignore_ascii_case("farm") {
            debug!(sort = raw, "sort key does not apply to farms");
            return None;
        }
        match key.to_lowercase().as_str() {
            "plant" | "item" => Some(FarmSort::Plant),
            "level" => Some(FarmSort::Level),
            _ => {
                debug!(sort = raw, "unknown farm sort key");
                None
            }
        }
    }

    fn apply(self, plots: &mut [FarmPlot]) {
        match self {
            FarmSort::Plant => plots.sort_by_key(|p| p.status.item_id),
            FarmSort::Level => plots.sort_by_key(|p| p.level),
        }
    }
}

fn render_profile<W: Write>(
    p: &Profile,
    items: &[Item],
    sections: &SectionFilter,
    farm_sort: Option<FarmSort>,
    now: DateTime<Utc>,
    out: &mut W,
) -> io::Result<()> {
    let mut sw = SectionWriter::new(out);

    if sections.wants("basic") {
        sw.title("Basic")?;
        sw.row("ID", p.id.to_string());
        sw.row("Name", p.name.as_str());
        sw.row("Registered", p.registration_date.as_str());
        sw.row("Rank", p.rank.to_string());
        sw.row("Tier", p.tier.to_string());
        sw.row("BC", format_price(p.bc, true));
        sw.row("SP", format_price(p.sp, true));
        sw.row("KR", format_price(p.kr, true));
        sw.row("Quest Level", p.quest_level.to_string());
        sw.row("Daily Streak", p.daily_claim_streak.to_string());
        sw.row("Vote Streak", p.daily_vote_streak.to_string());
    }

    if sections.wants("faction") && p.faction_id != 0 {
        sw.title("Faction")?;
        sw.row("Tag", p.faction.tag.as_str());
        sw.row("Name", p.faction.name.as_str());
        sw.row("Member Count", p.faction.member_count.to_string());
        sw.row("Owner", p.faction.owner_bc_id.to_string());
        sw.row("Recruiting", p.faction.is_recruiting.to_string());
        sw.row("About", p.faction.about.as_str());
        sw.row("MOTD", p.faction.motd.as_str());
    }

    if sections.wants("farms") {
        sw.title("Farm Plots")?;
        let mut plots = p.farm_plots.clone();
        if let Some(sort) = farm_sort {
            sort.apply(&mut plots);
        }
        for (i, plot) in plots.iter().enumerate() {
            let mut text = format!(
                "Level: {:<2} | Extra: {:<5} | Planted: {:<5}",
                plot.level, plot.is_extra, plot.status.is_planted
            );
            if plot.status.is_planted {
                text.push_str(&format!(
                    " | {} ({}) on {}",
                    lookup_item_name(plot.status.item_id, items),
                    plot.status.item_id,
                    epoch_millis_to_rfc3339(plot.status.planted_time)
                ));
            }
            if plot.boost.multiplier > 1 {
                text.push_str(&format!(
                    " | Boost x{} | Ends at {}",
                    plot.boost.multiplier,
                    ends_at(plot.boost.end_time, now)
                ));
            }
            sw.row(&format!("Plot {}", i + 1), text);
        }
    }

    if sections.wants("generators") {
        sw.title("Generators")?;
        for (i, generator) in p.generators.iter().enumerate() {
            sw.row(
                &format!("Gen {}", i + 1),
                format!(
                    "Level: {:<2} | Extra: {:<5}",
                    generator.level, generator.is_extra
                ),
            );
        }
    }

    if sections.wants("quests") {
        sw.title("Quests")?;
        for (i, quest) in p.quests.iter().enumerate() {
            sw.row(
                &format!("Quest {}", i + 1),
                format!(
                    "{} ({}) | Required: {} | Fulfilled: {}",
                    lookup_item_name(quest.item_id, items),
                    quest.item_id,
                    format_price(quest.amount_required, true),
                    format_price(quest.amount_fulfilled, true)
                ),
            );
        }
    }

    if sections.wants("cooldowns") {
        sw.title("Cooldowns")?;
        for (label, ms) in p.cooldowns.entries() {
            sw.row(label, last_used(ms, now));
        }
    }

    if sections.wants("effects") {
        sw.title("Effects")?;
        let mut names: Vec<&String> = p.effects.keys().collect();
        names.sort();
        for name in names {
            let effect = &p.effects[name];
            sw.row(&format!("{} End", name), ends_at(effect.end_time, now));
            sw.row(&format!("{} Type", name), effect.modifier.kind.as_str());
            if !effect.modifier.action.is_empty() {
                sw.row(&format!("{} Action", name), effect.modifier.action.as_str());
            }
            sw.row(
                &format!("{} Mult x", name),
                effect.modifier.multiplier.to_string(),
            );
        }
    }

    if sections.wants("upgrades") {
        sw.title("Upgrades")?;
        for (label, level) in p.upgrades.entries() {
            sw.row(label, level.to_string());
        }
    }

    if sections.wants("perks") {
        sw.title("Perks")?;
        for (label, level) in p.perks.entries() {
            sw.row(label, level.to_string());
        }
    }

    if sections.wants("settings") {
        sw.title("Settings")?;
        if let Some(stat) = p.settings.profile_show_stat_id {
            sw.row("ProfileShowStatID", stat.to_string());
        }
        sw.row("SyncDiscordName", p.settings.sync_discord_name.to_string());
        sw.row(
            "PublicDiscordProfile",
            p.settings.public_discord_profile.to_string(),
        );
        sw.row(
            "DiscordPingOnResponse",
            p.settings.discord_ping_on_response.to_string(),
        );
    }

    if sections.wants("custom") {
        sw.title("Custom")?;
        sw.row("HideAvatar", p.custom.profile_hide_avatar.to_string());
        sw.row("HideTitleName", p.custom.profile_hide_title_name.to_string());
        sw.row(
            "UseChatEmblemEmoji",
            p.custom.profile_use_chat_emblem_emoji.to_string(),
        );
        if let Some(background) = &p.custom.profile_background {
            sw.row("Background", background.as_str());
        }
    }

    sw.flush()
}

/// `<timestamp> Last Used: <elapsed>`, or `-` when the action was never used
fn last_used(ms: i64, now: DateTime<Utc>) -> String {
    let iso = epoch_millis_to_rfc3339(ms);
    match elapsed_since(&iso, now) {
        Ok(elapsed) => format!("{} Last Used: {}", iso, elapsed),
        Err(_) => iso,
    }
}

/// `<timestamp> (<remaining> left)`, or `-` when unset
fn ends_at(ms: i64, now: DateTime<Utc>) -> String {
    let iso = epoch_millis_to_rfc3339(ms);
    match remaining_until(&iso, now) {
        Ok(left) => format!("{} ({} left)", iso, left),
        Err(_) => iso,
    }
}
