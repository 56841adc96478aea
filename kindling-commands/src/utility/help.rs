use crate::cogs::command_enabled;
use crate::utility::embeds::{
    command_help_description, grouped_help_description, no_commands_message,
    page_out_of_range_message, unknown_query_message,
};
use crate::{COMMANDS, CommandMeta, find_command};
use kindling_core::{Context, Error};
use kindling_database::impls::settings::get_prefix;
use kindling_utils::embed::build_paginated_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists all commands, one category or one command.",
    category: "utility",
    usage: "help [page|category|command]",
};

const HELP_COMMANDS_PER_PAGE: usize = 20;

#[derive(Debug, PartialEq, Eq)]
enum HelpQuery<'a> {
    Page(usize),
    Category(&'a str),
    Command(&'static CommandMeta),
    Unknown(&'a str),
}

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Page number, category or command"]
    #[rest]
    query: Option<String>,
) -> Result<(), Error> {
    let prefix = get_prefix(&ctx.data().db).await?;
    let enabled = &ctx.data().enabled_cogs;
    let visible: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|command| command_enabled(enabled, command.name))
        .collect();

    let mut categories: Vec<&str> = visible.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    let (category, requested_page) = match parse_query(query.as_deref(), &visible, &categories) {
        HelpQuery::Page(page) => (None, page),
        HelpQuery::Category(category) => (Some(category), 1),
        HelpQuery::Command(command) => {
            let embed = build_paginated_embed(
                &format!("Help: {}", command.name),
                command_help_description(command, &prefix),
                1,
                1,
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        }
        HelpQuery::Unknown(raw) => {
            ctx.say(unknown_query_message(raw, &categories)).await?;
            return Ok(());
        }
    };

    let commands = sorted_commands(&visible, category);
    if commands.is_empty() {
        ctx.say(no_commands_message(category)).await?;
        return Ok(());
    }

    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    if requested_page > total {
        ctx.say(page_out_of_range_message(requested_page, total)).await?;
        return Ok(());
    }

    let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, requested_page);
    let embed = build_paginated_embed(
        "Available Commands",
        grouped_help_description(&commands[start..end], &prefix),
        requested_page,
        total,
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn parse_query<'a>(
    query: Option<&'a str>,
    visible: &[&'static CommandMeta],
    categories: &[&str],
) -> HelpQuery<'a> {
    let Some(raw) = query.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return HelpQuery::Page(1);
    };

    if let Some(page) = raw.parse::<usize>().ok().filter(|page| *page >= 1) {
        return HelpQuery::Page(page);
    }

    if categories
        .iter()
        .any(|category| category.eq_ignore_ascii_case(raw))
    {
        return HelpQuery::Category(raw);
    }

    match find_command(raw) {
        Some(command) if visible.iter().any(|meta| meta.name == command.name) => {
            HelpQuery::Command(command)
        }
        _ => HelpQuery::Unknown(raw),
    }
}

fn total_pages(total_items: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    let pages = total_items.div_ceil(per_page);
    pages.max(1)
}

fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

fn sorted_commands(
    visible: &[&'static CommandMeta],
    category: Option<&str>,
) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = visible
        .iter()
        .copied()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category.eq_ignore_ascii_case(wanted),
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::{HelpQuery, page_window, parse_query, sorted_commands, total_pages};
    use crate::{COMMANDS, CommandMeta};

    fn all() -> Vec<&'static CommandMeta> {
        COMMANDS.iter().collect()
    }

    #[test]
    fn empty_query_is_first_page() {
        let visible = all();
        assert_eq!(parse_query(None, &visible, &["utility"]), HelpQuery::Page(1));
        assert_eq!(parse_query(Some("  "), &visible, &["utility"]), HelpQuery::Page(1));
        assert_eq!(parse_query(Some("2"), &visible, &["utility"]), HelpQuery::Page(2));
    }

    #[test]
    fn query_resolves_categories_before_commands() {
        let visible = all();
        assert_eq!(
            parse_query(Some("Utility"), &visible, &["utility"]),
            HelpQuery::Category("Utility")
        );
        assert!(matches!(
            parse_query(Some("ping"), &visible, &["utility"]),
            HelpQuery::Command(meta) if meta.name == "ping"
        ));
        assert_eq!(
            parse_query(Some("nothing"), &visible, &["utility"]),
            HelpQuery::Unknown("nothing")
        );
    }

    #[test]
    fn hidden_commands_are_unknown() {
        let visible: Vec<&'static CommandMeta> =
            COMMANDS.iter().filter(|meta| meta.name != "userlog").collect();
        assert_eq!(
            parse_query(Some("userlog"), &visible, &[]),
            HelpQuery::Unknown("userlog")
        );
    }

    #[test]
    fn commands_sort_by_category_then_name() {
        let sorted = sorted_commands(&all(), Some("utility"));
        assert!(!sorted.is_empty());
        assert!(sorted.iter().all(|meta| meta.category == "utility"));
        assert!(sorted.windows(2).all(|pair| pair[0].name <= pair[1].name));
    }

    #[test]
    fn paging_math() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(page_window(25, 20, 2), (20, 25));
        assert_eq!(page_window(5, 20, 3), (5, 5));
    }
}
