use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voxplay::app_core::{AppCore, NoPicker, PlaybackState};
use voxplay::audio_thread::spawn_audio_thread;
use voxplay::notify::StdoutNotifier;

#[derive(Parser)]
#[command(name = "voxplay", about = "Voice-controllable music player CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show library status
    Status,
    /// List the playlist
    List,
    /// Add music file(s) to the playlist
    Add {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Add every MP3 in a folder (non-recursive)
    AddFolder { folder: PathBuf },
    /// Select a track by number (1-based) without playing it
    Select { track: usize },
    /// Play the selected track, or one given with --track (1-based)
    Play {
        #[arg(short, long)]
        track: Option<usize>,
    },
    /// Play a random track
    Shuffle,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Back,
    /// Dispatch a free-text command, as if it had been spoken
    Say { text: String },
}

fn state_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("voxplay").join("library.json"))
        .unwrap_or_else(|| PathBuf::from("voxplay_library.json"))
}

fn main() {
    let cli = Cli::parse();

    let audio = spawn_audio_thread();
    let mut core = AppCore::new(
        &state_file_path(),
        Box::new(audio.clone()),
        Box::new(StdoutNotifier),
    );

    match cli.command {
        Commands::Status => {
            let transport = core.transport();
            println!("voxplay v0.1.0");
            println!();
            println!("Tracks: {}", transport.track_count);
            match transport.selected_index {
                Some(index) => println!("Selected: track {}", index + 1),
                None => println!("Selected: none"),
            }
        }
        Commands::List => {
            let selected = core.transport().selected_index;
            for track in core.tracks() {
                let marker = if selected == Some(track.index) { ">" } else { " " };
                println!(
                    "{} {:>3}. {} — {} [{}]",
                    marker,
                    track.index + 1,
                    track.artist,
                    track.title,
                    track.duration_display
                );
            }
        }
        Commands::Add { files } => {
            core.add_files(&files);
        }
        Commands::AddFolder { folder } => {
            core.add_folder(&folder);
        }
        Commands::Select { track } => {
            if track == 0 || !core.select(track - 1) {
                eprintln!("Track {} out of range", track);
            }
        }
        Commands::Play { track } => {
            match track {
                Some(number) if number > 0 => {
                    if core.play_at(number - 1).is_none() {
                        eprintln!("Track {} out of range", number);
                    }
                }
                Some(number) => eprintln!("Track {} out of range", number),
                None => {
                    core.play_selected();
                }
            };
        }
        Commands::Shuffle => {
            core.shuffle();
        }
        Commands::Next => {
            core.play_next();
        }
        Commands::Back => {
            core.play_previous();
        }
        Commands::Say { text } => {
            core.handle_command_text(&text, &mut NoPicker);
        }
    }

    // One-shot process: hold on until the started track has finished
    if core.state == PlaybackState::Playing {
        audio.block_until_end();
    }
    audio.shutdown();
}
