#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::sync::Mutex;
use tauri::State;
use tauri_plugin_dialog::DialogExt;
use voxplay::app_core::{AppCore, FilePicker, TrackData, TransportData};
use voxplay::audio_thread::spawn_audio_thread;
use voxplay::notify::NullNotifier;

struct AppState {
    core: Mutex<AppCore>,
}

/// File-selection collaborator backed by the dialog plugin. Blocking is
/// fine here: commands run off the main thread.
struct DialogPicker {
    app: tauri::AppHandle,
}

impl FilePicker for DialogPicker {
    fn pick_files(&mut self) -> Option<Vec<PathBuf>> {
        self.app
            .dialog()
            .file()
            .set_title("Select Music Files")
            .add_filter("MP3 Files", &["mp3"])
            .blocking_pick_files()
            .map(|files| {
                files
                    .into_iter()
                    .filter_map(|file| file.into_path().ok())
                    .collect()
            })
    }

    fn pick_folder(&mut self) -> Option<PathBuf> {
        self.app
            .dialog()
            .file()
            .set_title("Select a Folder Containing Music Files")
            .blocking_pick_folder()
            .and_then(|folder| folder.into_path().ok())
    }
}

#[tauri::command]
fn get_transport(state: State<AppState>) -> TransportData {
    state.core.lock().unwrap().transport()
}

#[tauri::command]
fn get_tracks(state: State<AppState>) -> Vec<TrackData> {
    state.core.lock().unwrap().tracks()
}

#[tauri::command]
fn select_track(state: State<AppState>, index: usize) -> bool {
    state.core.lock().unwrap().select(index)
}

#[tauri::command]
fn play_selected(state: State<AppState>) -> String {
    state.core.lock().unwrap().play_selected()
}

#[tauri::command]
fn play_at(state: State<AppState>, index: usize) -> Option<String> {
    state.core.lock().unwrap().play_at(index)
}

#[tauri::command]
fn next_track(state: State<AppState>) -> String {
    state.core.lock().unwrap().play_next()
}

#[tauri::command]
fn previous_track(state: State<AppState>) -> String {
    state.core.lock().unwrap().play_previous()
}

#[tauri::command]
fn pause(state: State<AppState>) -> String {
    state.core.lock().unwrap().pause()
}

#[tauri::command]
fn resume(state: State<AppState>) -> String {
    state.core.lock().unwrap().resume()
}

#[tauri::command]
fn stop(state: State<AppState>) -> String {
    state.core.lock().unwrap().stop()
}

#[tauri::command]
fn shuffle(state: State<AppState>) -> String {
    state.core.lock().unwrap().shuffle()
}

#[tauri::command]
fn add_music(app: tauri::AppHandle, state: State<AppState>) -> String {
    let mut picker = DialogPicker { app };
    state.core.lock().unwrap().add_music(&mut picker)
}

/// Dispatch a transcript from the webview's speech recognizer. The webview
/// also renders the returned status and feeds it to speech synthesis.
#[tauri::command]
fn voice_command(app: tauri::AppHandle, state: State<AppState>, transcript: String) -> String {
    let mut picker = DialogPicker { app };
    state
        .core
        .lock()
        .unwrap()
        .handle_command_text(&transcript, &mut picker)
}

fn state_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("voxplay").join("library.json"))
        .unwrap_or_else(|| PathBuf::from("voxplay_library.json"))
}

fn main() {
    let audio = spawn_audio_thread();
    let core = AppCore::new(&state_file_path(), Box::new(audio), Box::new(NullNotifier));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(AppState {
            core: Mutex::new(core),
        })
        .invoke_handler(tauri::generate_handler![
            get_transport,
            get_tracks,
            select_track,
            play_selected,
            play_at,
            next_track,
            previous_track,
            pause,
            resume,
            stop,
            shuffle,
            add_music,
            voice_command,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
