//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from the data they show:
//! - `TitleBar`: app name, selected agent, status text
//! - `MessageBubble`: one chat message rendered as markdown
//! - `Toolbar`: formatting shortcuts and editor/preview mode
//! - `Sidebar`: agents, modal shortcuts, documents
//! - `Toast`: the current notification
//!
//! ### Stateful Components (Event-Driven)
//!
//! Hold local state across frames and emit events to the event loop:
//! - `InputBox`: the markdown composer (draft, cursor, selection)
//! - `MessageList`: scrollable conversation with a height cache
//! - `dialog`: Add Agent / Upload Document forms (state lives in the core)
//!
//! Components receive external data as props (struct fields or parameters)
//! and never reach into `App` themselves.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── sidebar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── toolbar.rs
//! ├── toast.rs
//! ├── input_box/   (composer: cursor.rs, text_wrap.rs)
//! └── dialog/      (agent_form.rs, upload_form.rs)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod dialog;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod sidebar;
pub mod toast;
pub mod toolbar;

pub use dialog::DialogEvent;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarInput};
pub use toast::Toast;
pub use toolbar::Toolbar;
