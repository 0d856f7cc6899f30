// Application commands. `swt-install` has a single action: fetch and install SWT.
pub mod install;
