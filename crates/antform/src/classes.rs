//! Ant Design v4 DOM contract.
//!
//! Every selector and marker class the strategies rely on lives here. Each
//! entry mirrors the markup rendered by the widget library; a rename on that
//! side breaks the matching strategy.
//!
//! Selectors are compound (no combinators) so they can be chained through
//! [`Locator`](crate::Locator) steps. Constants ending in `_CLASS` are bare
//! class names used with `has_class`.

/// Default form root
pub const FORM: &str = "form.ant-form";
/// Form field wrapper
pub const FORM_ITEM: &str = ".ant-form-item";
/// Label cell inside a form field
pub const FORM_ITEM_LABEL: &str = ".ant-form-item-label";

/// Single-line text box
pub const INPUT: &str = "input";
/// Multi-line text box
pub const TEXTAREA: &str = "textarea";

/// Select root
pub const SELECT: &str = ".ant-select";
/// Select root while options are being fetched
pub const SELECT_LOADING: &str = ".ant-select.ant-select-loading";
/// Loading marker on the select root
pub const SELECT_LOADING_CLASS: &str = "ant-select-loading";
/// Embedded search box of a searchable select
pub const SELECT_SEARCH_INPUT: &str = ".ant-select-selection-search-input";
/// Open select overlay
pub const SELECT_DROPDOWN: &str = ".ant-select-dropdown:not(.ant-select-dropdown-hidden)";
/// Option inside a select overlay
pub const SELECT_OPTION: &str = ".ant-select-item-option";

/// Cascader root
pub const CASCADER: &str = ".ant-cascader";
/// Open cascader overlay
pub const CASCADER_DROPDOWN: &str = ".ant-cascader-dropdown:not(.ant-select-dropdown-hidden)";
/// One column of the cascader overlay
pub const CASCADER_MENU: &str = ".ant-cascader-menu";
/// Item inside a cascader column
pub const CASCADER_MENU_ITEM: &str = ".ant-cascader-menu-item";

/// Tree select root
pub const TREE_SELECT: &str = ".ant-tree-select";
/// Open tree select overlay
pub const TREE_SELECT_DROPDOWN: &str =
    ".ant-tree-select-dropdown:not(.ant-select-dropdown-hidden)";
/// Flat list holding every rendered tree node
pub const TREE_LIST: &str = ".ant-select-tree-list-holder-inner";
/// Rendered tree node
pub const TREE_NODE: &str = ".ant-select-tree-treenode";
/// One unit of indentation; a node at depth `n` renders `n` of them
pub const TREE_INDENT_UNIT: &str = ".ant-select-tree-indent-unit";
/// Checkbox of a checkable node that is not yet checked
pub const TREE_CHECKBOX_UNCHECKED: &str =
    ".ant-select-tree-checkbox:not(.ant-select-tree-checkbox-checked)";
/// Expand/collapse switcher in the collapsed state
pub const TREE_SWITCHER_CLOSED: &str = ".ant-select-tree-switcher.ant-select-tree-switcher_close";
/// Title of a node that is not selected
pub const TREE_TITLE_UNSELECTED: &str =
    ".ant-select-tree-node-content-wrapper:not(.ant-select-tree-node-selected)";

/// Radio group root
pub const RADIO_GROUP: &str = ".ant-radio-group";
/// Button-style radio option
pub const RADIO_BUTTON_WRAPPER: &str = ".ant-radio-button-wrapper";
/// Plain radio option
pub const RADIO_WRAPPER: &str = ".ant-radio-wrapper";

/// Checkbox group root
pub const CHECKBOX_GROUP: &str = ".ant-checkbox-group";
/// Checkbox option
pub const CHECKBOX_WRAPPER: &str = ".ant-checkbox-wrapper";
/// Checked marker on a checkbox option
pub const CHECKBOX_CHECKED_CLASS: &str = "ant-checkbox-wrapper-checked";

/// Switch root
pub const SWITCH: &str = ".ant-switch";
/// Checked marker on a switch
pub const SWITCH_CHECKED_CLASS: &str = "ant-switch-checked";

/// Page body, clicked to dismiss overlays
pub const BODY: &str = "body";
