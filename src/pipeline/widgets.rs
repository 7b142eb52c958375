//! The viewer's screen: header bar, document sidebar and main pane.
//!
//! ```text
//! ┌ OuterContainer ─────────────────────────────────────────────┐
//! │ ┌ HeaderBar ──────────────────────────────────────────────┐ │
//! │ │ [File] [Swap]  ......spacer......  [Upload][Media][Support]│
//! │ └─────────────────────────────────────────────────────────┘ │
//! │ ┌ LowerContent ───────────────────────────────────────────┐ │
//! │ │ ┌ Sidebar ┐ ┌ MainContent (scrolls) ──────────────────┐ │ │
//! │ │ │ titles  │ │ title                                   │ │ │
//! │ │ │ ...     │ │ body / DocumentText + [Copy]            │ │ │
//! │ │ └─────────┘ └─────────────────────────────────────────┘ │ │
//! │ └─────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::document::{Document, DocumentCollection};
use crate::engine::element::ElementId;
use crate::engine::interaction::{CopySelection, DragSelect, SelectDocument, ToggleSidebar};
use crate::error::Result;
use crate::layout::segment::segment_text;
use crate::layout::tree::{ElementDecl, Floating, TextConfig};
use crate::state::selection::TextSelection;
use crate::types::{ChildAlignment, Dimension, FlexDirection, Padding, Rgba, Sizing};

use super::ui::Ui;
use super::viewer::ViewerState;

// =============================================================================
// Element ids
// =============================================================================

pub const OUTER_CONTAINER: ElementId = ElementId::new("OuterContainer");
pub const HEADER_BAR: ElementId = ElementId::new("HeaderBar");
pub const FILE_BUTTON: ElementId = ElementId::new("FileButton");
pub const FILE_MENU: ElementId = ElementId::new("FileMenu");
pub const SWAP_BUTTON: ElementId = ElementId::new("SwapButton");
pub const LOWER_CONTENT: ElementId = ElementId::new("LowerContent");
pub const SIDEBAR: ElementId = ElementId::new("Sidebar");
pub const MAIN_CONTENT: ElementId = ElementId::new("MainContent");
pub const DOCUMENT_TEXT: ElementId = ElementId::new("DocumentText");
pub const COPY_BUTTON: ElementId = ElementId::new("CopyButton");

/// Id of the sidebar entry for document `index`.
pub const fn sidebar_item(index: usize) -> ElementId {
    ElementId::indexed("SidebarItem", index as u32)
}

// =============================================================================
// Style
// =============================================================================

const OUTER_BACKGROUND: Rgba = Rgba::rgb(43, 41, 51);
const CONTENT_BACKGROUND: Rgba = Rgba::rgb(90, 90, 90);
const BUTTON_BACKGROUND: Rgba = Rgba::rgb(140, 140, 140);
const MENU_BACKGROUND: Rgba = Rgba::rgb(40, 40, 40);
const ITEM_BACKGROUND: Rgba = Rgba::rgb(120, 120, 120);
const ITEM_HOVER_ALPHA: u8 = 120;
const HIGHLIGHT: Rgba = Rgba::new(255, 255, 0, 128);

const BODY_TEXT: TextConfig = TextConfig::new(0, 24, Rgba::WHITE);
const SIDEBAR_TEXT: TextConfig = TextConfig::new(0, 20, Rgba::WHITE);
const BUTTON_TEXT: TextConfig = TextConfig::new(0, 16, Rgba::WHITE);

const HEADER_BUTTON_PADDING: Padding = Padding::new(16.0, 16.0, 8.0, 8.0);

// =============================================================================
// Frame
// =============================================================================

/// What the screen is built from.
#[derive(Debug, Clone, Copy)]
pub struct FrameModel<'a> {
    pub state: &'a ViewerState,
    pub documents: &'a DocumentCollection,
    pub selection: &'a TextSelection,
    /// The document that supports drag selection and copy.
    pub selectable_document: usize,
}

/// Declare the whole screen.
///
/// # Panics
///
/// If the selected document is not in the collection.
pub fn build(ui: &mut Ui<'_>, model: &FrameModel<'_>) -> Result<()> {
    let selected = model.state.selected_document;
    let Some(document) = model.documents.get(selected) else {
        panic!(
            "selected document {selected} out of range for {} documents",
            model.documents.len()
        );
    };

    let outer = ElementDecl::new()
        .id(OUTER_CONTAINER)
        .background(OUTER_BACKGROUND)
        .direction(FlexDirection::TopToBottom)
        .sizing(Sizing::GROW)
        .padding(Padding::all(16.0))
        .child_gap(16.0);

    ui.element(outer, |ui| {
        header_bar(ui)?;

        let lower = ElementDecl::new().id(LOWER_CONTENT).sizing(Sizing::GROW).child_gap(16.0);
        ui.element(lower, |ui| {
            if model.state.sidebar_visible {
                sidebar(ui, model)?;
            }
            main_content(ui, model, document)
        })
    })
}

// =============================================================================
// Header
// =============================================================================

fn header_bar(ui: &mut Ui<'_>) -> Result<()> {
    let bar = ElementDecl::new()
        .id(HEADER_BAR)
        .width(Dimension::Grow)
        .height(Dimension::Fixed(60.0))
        .padding(Padding::new(16.0, 16.0, 0.0, 0.0))
        .child_gap(16.0)
        .align(ChildAlignment::Center)
        .background(CONTENT_BACKGROUND)
        .corner_radius(8.0);

    ui.element(bar, |ui| {
        ui.element(header_button_decl().id(FILE_BUTTON), |ui| {
            ui.text("File", BUTTON_TEXT);
            if ui.pointer_over(FILE_BUTTON) || ui.pointer_over(FILE_MENU) {
                file_menu(ui)?;
            }
            Ok(())
        })?;

        ui.element(header_button_decl().id(SWAP_BUTTON), |ui| {
            ui.text("Swap", BUTTON_TEXT);
            ui.on_hover(SWAP_BUTTON, ToggleSidebar)
        })?;

        ui.leaf(ElementDecl::new().width(Dimension::Grow));

        for label in ["Upload", "Media", "Support"] {
            ui.element(header_button_decl(), |ui| {
                ui.text(label, BUTTON_TEXT);
                Ok(())
            })?;
        }
        Ok(())
    })
}

fn header_button_decl() -> ElementDecl {
    ElementDecl::new()
        .padding(HEADER_BUTTON_PADDING)
        .background(BUTTON_BACKGROUND)
        .corner_radius(5.0)
}

/// Dropdown under the File button. Only declared while hovered.
fn file_menu(ui: &mut Ui<'_>) -> Result<()> {
    let anchor = ElementDecl::new()
        .id(FILE_MENU)
        .floating(Floating::default())
        .padding(Padding::new(0.0, 0.0, 8.0, 8.0));

    ui.element(anchor, |ui| {
        let panel = ElementDecl::new()
            .direction(FlexDirection::TopToBottom)
            .width(Dimension::Fixed(200.0))
            .background(MENU_BACKGROUND)
            .corner_radius(8.0);

        ui.element(panel, |ui| {
            for label in ["New", "Open", "Close"] {
                ui.element(ElementDecl::new().padding(Padding::all(16.0)), |ui| {
                    ui.text(label, BUTTON_TEXT);
                    Ok(())
                })?;
            }
            Ok(())
        })
    })
}

// =============================================================================
// Sidebar
// =============================================================================

fn sidebar(ui: &mut Ui<'_>, model: &FrameModel<'_>) -> Result<()> {
    let panel = ElementDecl::new()
        .id(SIDEBAR)
        .background(CONTENT_BACKGROUND)
        .direction(FlexDirection::TopToBottom)
        .padding(Padding::all(16.0))
        .child_gap(8.0)
        .width(Dimension::Fixed(250.0))
        .height(Dimension::Grow);

    ui.element(panel, |ui| {
        for (index, document) in model.documents.iter().enumerate() {
            let id = sidebar_item(index);
            let item = ElementDecl::new()
                .id(id)
                .width(Dimension::Grow)
                .padding(Padding::all(16.0))
                .corner_radius(8.0);

            if index == model.state.selected_document {
                ui.element(item.background(ITEM_BACKGROUND), |ui| {
                    ui.text(document.title.as_str(), SIDEBAR_TEXT);
                    Ok(())
                })?;
            } else {
                let alpha = if ui.pointer_over(id) { ITEM_HOVER_ALPHA } else { 0 };
                ui.element(item.background(ITEM_BACKGROUND.with_alpha(alpha)), |ui| {
                    ui.on_hover(id, SelectDocument { requested: index })?;
                    ui.text(document.title.as_str(), SIDEBAR_TEXT);
                    Ok(())
                })?;
            }
        }
        Ok(())
    })
}

// =============================================================================
// Main pane
// =============================================================================

fn main_content(ui: &mut Ui<'_>, model: &FrameModel<'_>, document: &Document) -> Result<()> {
    let pane = ElementDecl::new()
        .id(MAIN_CONTENT)
        .background(CONTENT_BACKGROUND)
        .scroll_vertical()
        .direction(FlexDirection::TopToBottom)
        .child_gap(16.0)
        .padding(Padding::all(16.0))
        .sizing(Sizing::GROW);

    ui.element(pane, |ui| {
        ui.text(document.title.as_str(), BODY_TEXT);

        let selected = model.state.selected_document;
        if selected == model.selectable_document {
            document_text(ui, document, selected, model.selection)?;
            copy_button(ui, selected)
        } else {
            ui.text(document.contents.as_str(), BODY_TEXT);
            Ok(())
        }
    })
}

/// Body of the selectable document, split around the selection.
fn document_text(
    ui: &mut Ui<'_>,
    document: &Document,
    index: usize,
    selection: &TextSelection,
) -> Result<()> {
    let row = ElementDecl::new().id(DOCUMENT_TEXT).direction(FlexDirection::LeftToRight);

    ui.element(row, |ui| {
        ui.on_hover(DOCUMENT_TEXT, DragSelect { document: index, text: BODY_TEXT })?;

        for segment in segment_text(&document.contents, selection.start, selection.end) {
            if segment.highlighted {
                ui.element(ElementDecl::new().background(HIGHLIGHT), |ui| {
                    ui.text(segment.text, BODY_TEXT);
                    Ok(())
                })?;
            } else {
                ui.text(segment.text, BODY_TEXT);
            }
        }
        Ok(())
    })
}

fn copy_button(ui: &mut Ui<'_>, document: usize) -> Result<()> {
    let button = ElementDecl::new()
        .id(COPY_BUTTON)
        .padding(Padding::all(16.0))
        .background(ITEM_BACKGROUND)
        .corner_radius(5.0);

    ui.element(button, |ui| {
        ui.text("Copy", BUTTON_TEXT);
        ui.on_hover(COPY_BUTTON, CopySelection { document })
    })
}
