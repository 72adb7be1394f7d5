//! The overlay's UI thread: sampling timer, mouse input, context menu,
//! and the message loop.
//!
//! All state lives in a thread-local [`App`]. The window procedure feeds
//! mouse messages to the platform-free [`Overlay`] controller and carries
//! out the commands it returns. The borrow on `App` is always released
//! before anything that can pump messages (the context menu) runs.

use std::cell::RefCell;

use hwmon_core::component::Components;
use hwmon_core::config::{ComponentKind, Config, StyleConfig};
use hwmon_core::layout::{Layout, RowMetrics};
use hwmon_core::overlay::{Command, Input, Overlay};
use hwmon_core::{HwResult, Palette, Point, log_debug, log_info, log_warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DefWindowProcW, DestroyMenu, DestroyWindow, DispatchMessageW,
    GetCursorPos, GetMessageW, KillTimer, MF_STRING, MSG, PostMessageW, PostQuitMessage,
    SetForegroundWindow, SetTimer, TPM_RETURNCMD, TPM_RIGHTBUTTON, TrackPopupMenuEx,
    TranslateMessage, WM_CAPTURECHANGED, WM_CLOSE, WM_DESTROY, WM_LBUTTONDOWN, WM_LBUTTONUP,
    WM_MOUSEMOVE, WM_RBUTTONUP, WM_TIMER,
};
use windows::core::w;

use crate::network::NetworkBackend;
use crate::overlay::{OverlayWindow, Theme};
use crate::sensors::SensorBackend;
use crate::{ctrl_c, monitors_or_screen, system};

const TIMER_ID: usize = 1;
/// `MK_LBUTTON` in a mouse message's `wParam`.
const MK_LBUTTON: usize = 0x0001;
const MENU_EXIT: usize = 1;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

struct App {
    window: OverlayWindow,
    overlay: Overlay,
    components: Components,
    sensors: SensorBackend,
    network: Option<NetworkBackend>,
    palette: Palette,
    style: StyleConfig,
}

impl App {
    /// Polls every backend once and repaints when a label changed.
    fn tick(&mut self) {
        let metrics = self.sensors.sample();
        let net = self.network.as_mut().map(NetworkBackend::sample);
        let now = system::local_time();
        if self.components.feed(&metrics, net.as_ref(), &now) {
            self.redraw();
        }
    }

    fn redraw(&self) {
        let theme = Theme {
            palette: &self.palette,
            style: &self.style,
        };
        self.window.present(
            self.overlay.frame(),
            self.overlay.layout(),
            self.overlay.is_minimized(),
            &self.components,
            &theme,
        );
    }
}

/// Runs the overlay on the calling thread until it is closed.
pub fn run(config: Config) -> HwResult<()> {
    system::enable_dpi_awareness();

    let sensors = SensorBackend::new()?;
    let network = if config.has_component(ComponentKind::Network) {
        match NetworkBackend::new() {
            Ok(backend) => Some(backend),
            Err(e) => {
                log_warn!("Network counters unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    let components = Components::from_config(&config);
    let layout = Layout::new(
        &components.kinds(),
        config.window.width,
        RowMetrics::from_config(&config),
    );
    let mut overlay = Overlay::new(layout, config.window.snap_px, config.window.click_threshold);
    let frame = overlay.place(&monitors_or_screen(), config.window.anchor);

    let window = OverlayWindow::create(frame, Some(wnd_proc))?;
    let hwnd = window.hwnd();
    if let Err(e) = ctrl_c::set_handler(hwnd) {
        log_warn!("Failed to install Ctrl+C handler: {e}");
    }

    let mut app = App {
        window,
        overlay,
        components,
        sensors,
        network,
        palette: Palette::from_config(&config.colors),
        style: config.style.clone(),
    };
    app.tick();
    app.redraw();
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    let interval = u32::try_from(config.window.refresh_ms).unwrap_or(u32::MAX);
    unsafe {
        SetTimer(Some(hwnd), TIMER_ID, interval, None);
    }
    log_info!(
        "Overlay shown at ({}, {}) {}x{}, refreshing every {interval} ms",
        frame.x,
        frame.y,
        frame.width,
        frame.height
    );

    run_message_pump();

    // Dropped outside the borrow: DestroyWindow re-enters wnd_proc.
    let app = APP.with(|cell| cell.borrow_mut().take());
    drop(app);
    log_info!("Overlay closed");
    Ok(())
}

fn run_message_pump() {
    let mut msg = MSG::default();
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Runs `f` on the app unless it is missing or already borrowed.
fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TIMER if wparam.0 == TIMER_ID => {
            with_app(App::tick);
        }
        WM_LBUTTONDOWN => {
            unsafe {
                SetCapture(hwnd);
            }
            dispatch(
                hwnd,
                Input::PointerDown {
                    cursor: cursor_pos(),
                    monitors: monitors_or_screen(),
                },
            );
        }
        WM_MOUSEMOVE if wparam.0 & MK_LBUTTON != 0 => dispatch(
            hwnd,
            Input::PointerMove {
                cursor: cursor_pos(),
            },
        ),
        // Capture lost without a release (menu, Alt+Tab): end any drag.
        WM_CAPTURECHANGED => dispatch(
            hwnd,
            Input::Cancel {
                cursor: cursor_pos(),
            },
        ),
        WM_LBUTTONUP => {
            dispatch(
                hwnd,
                Input::PointerUp {
                    cursor: cursor_pos(),
                },
            );
            unsafe {
                let _ = ReleaseCapture();
            }
        }
        WM_RBUTTONUP => dispatch(
            hwnd,
            Input::ContextMenu {
                cursor: cursor_pos(),
            },
        ),
        WM_CLOSE => unsafe {
            let _ = DestroyWindow(hwnd);
        },
        WM_DESTROY => unsafe {
            let _ = KillTimer(Some(hwnd), TIMER_ID);
            PostQuitMessage(0);
        },
        _ => return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
    LRESULT(0)
}

/// Feeds `input` to the controller and executes the resulting commands.
fn dispatch(hwnd: HWND, input: Input) {
    let Some(commands) = with_app(|app| app.overlay.handle(input)) else {
        return;
    };
    for command in commands {
        match command {
            Command::Move(pos) => {
                with_app(|app| app.window.move_to(pos));
            }
            Command::SetFrame(_) | Command::Redraw => {
                with_app(|app| app.redraw());
            }
            Command::ShowMenu(at) => {
                if show_menu(hwnd, at) {
                    dispatch(hwnd, Input::MenuExit);
                }
            }
            Command::Exit => {
                log_debug!("Exit requested from context menu");
                unsafe {
                    let _ = PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0));
                }
            }
        }
    }
}

/// Shows the context menu at `at` and returns true if "Exit" was chosen.
fn show_menu(hwnd: HWND, at: Point) -> bool {
    unsafe {
        let Ok(menu) = CreatePopupMenu() else {
            return false;
        };
        let _ = AppendMenuW(menu, MF_STRING, MENU_EXIT, w!("Exit"));
        // Required for the menu to close when clicking elsewhere.
        let _ = SetForegroundWindow(hwnd);
        let chosen = TrackPopupMenuEx(
            menu,
            (TPM_RETURNCMD | TPM_RIGHTBUTTON).0,
            at.x,
            at.y,
            hwnd,
            None,
        );
        let _ = DestroyMenu(menu);
        chosen.0 as usize == MENU_EXIT
    }
}

fn cursor_pos() -> Point {
    let mut pt = POINT::default();
    unsafe {
        let _ = GetCursorPos(&mut pt);
    }
    Point::new(pt.x, pt.y)
}
