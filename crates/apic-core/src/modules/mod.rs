// Declarative object modules, one per managed-object type.
//
// Each module owns its class constants, hierarchy shape, typed desired
// state, and payload assembly. The reconciler stays generic; everything
// object-specific lives here.

pub mod match_as_path_regex_term;
