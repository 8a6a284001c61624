use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use spdlog::{info, warn};

use quillsite::convert::html_to_markdown::convert_directory;
use quillsite::logger::configure_logger;
use quillsite::post_processor::{create_post, render_posts, start_editor, today, update_homepage, update_library, update_sitemap, NewPost};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "quillsite.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config path
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a new Markdown post in the posts directory
    NewPost(NewPostArgs),
    /// Renders every Markdown post into an HTML page
    RenderPosts,
    /// Regenerates the notes list of the homepage
    UpdateHomepage,
    /// Regenerates sitemap.xml
    UpdateSitemap,
    /// Regenerates the library page (not implemented)
    UpdateLibrary,
    /// Converts legacy HTML posts into Markdown posts
    ConvertToMarkdown,
    /// Starts the post editor (not implemented)
    Editor(EditorArgs),
}

#[derive(Args, Debug)]
struct NewPostArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Short description, shown on the homepage
    #[arg(long, default_value = "")]
    desc: String,

    /// Comma separated tags
    #[arg(long, default_value = "")]
    tags: String,

    #[arg(short, long, default_value = "Notes")]
    section: String,
}

#[derive(Args, Debug)]
struct EditorArgs {
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = open_config(cli.config_path.map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let paths = &config.paths;
    match cli.command {
        Command::NewPost(args) => {
            let new_post = NewPost {
                title: &args.title,
                description: &args.desc,
                tags: &args.tags,
                section: &args.section,
            };
            let path = create_post(&paths.posts_dir, &new_post, today())
                .context("Could not create the new post")?;
            println!("Created {}", path.display());
        }
        Command::RenderPosts => {
            let count = render_posts(&config).context("Could not render posts")?;
            println!("Rendered {} posts", count);
        }
        Command::UpdateHomepage => {
            let count = update_homepage(&paths.posts_dir, &paths.homepage)
                .context("Could not update the homepage")?;
            println!("Updated {} with {} posts", paths.homepage.display(), count);
        }
        Command::UpdateSitemap => {
            let count = update_sitemap(&paths.posts_dir, &paths.sitemap, &config.site.base_url)
                .context("Could not update the sitemap")?;
            println!("Updated {} with {} posts", paths.sitemap.display(), count);
        }
        Command::UpdateLibrary => {
            update_library().context("Could not update the library")?;
        }
        Command::ConvertToMarkdown => {
            let count = convert_directory(&paths.posts_dir, &paths.markdown_dir)
                .context("Could not convert HTML posts")?;
            println!("Converted {} posts into {}", count, paths.markdown_dir.display());
        }
        Command::Editor(args) => {
            info!("Starting editor on port {}", args.port);
            start_editor(args.port).context("Could not start the editor")?;
        }
    }

    Ok(())
}
