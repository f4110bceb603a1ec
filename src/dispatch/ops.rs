use crate::error::LedgerError;

macro_rules! operations {
    (
        $(#[$meta:meta])*
        $name:ident, $entry:literal {
            $( $variant:ident => $function:literal / $arity:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Function name to operation lookup table.
            const TABLE: &'static [(&'static str, $name)] = &[
                $( ($function, $name::$variant) ),+
            ];

            /// Resolve a function name.
            pub fn from_name(function: &str) -> Result<Self, LedgerError> {
                Self::TABLE
                    .iter()
                    .find(|(name, _)| *name == function)
                    .map(|(_, op)| *op)
                    .ok_or_else(|| LedgerError::UnknownOperation {
                        entry: $entry,
                        function: function.to_string(),
                    })
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $function ),+
                }
            }

            /// Minimum number of arguments; extra ones are ignored.
            pub fn arity(&self) -> usize {
                match self {
                    $( $name::$variant => $arity ),+
                }
            }

            /// Every function name this entry accepts.
            pub fn names() -> impl Iterator<Item = &'static str> {
                Self::TABLE.iter().map(|(name, _)| *name)
            }

            pub(crate) fn check_arity<A>(&self, args: &[A]) -> Result<(), LedgerError> {
                if args.len() < self.arity() {
                    return Err(LedgerError::Arity {
                        function: self.name(),
                        expected: self.arity(),
                        actual: args.len(),
                    });
                }
                Ok(())
            }
        }
    };
}

operations! {
    /// Functions of the mutating entry.
    InvokeOp, "invoke" {
        Init => "init" / 0,
        ResetIndexes => "resetIndexes" / 0,
        AddUser => "addUser" / 2,
        AddTestdata => "addTestdata" / 3,
        CreateThing => "createThing" / 1,
        AddProject => "addProject" / 1,
        AddVoter => "addVoter" / 1,
        Vote => "vote" / 1,
    }
}

operations! {
    /// Functions of the read-only entry.
    QueryOp, "query" {
        GetUser => "getUser" / 1,
        AuthenticateAsUser => "authenticateAsUser" / 2,
        GetThingsByUserId => "getThingsByUserID" / 1,
        GetProject => "getProject" / 1,
        GetProjectsForVoter => "getProjectsForVoter" / 1,
        GetVoter => "getVoter" / 1,
        GetVoteForProjectByVoter => "getVoteForProjectByVoter" / 2,
        GetVotesByProjectId => "getVotesByProjectID" / 1,
    }
}
