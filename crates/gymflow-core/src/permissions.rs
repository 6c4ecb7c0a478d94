//! Static permission catalog.
//!
//! Declarative list of every permission the system knows about,
//! grouped by feature area for UI rendering. Provisioning derives the
//! default role permission sets from it; nothing mutates it.

/// A single permission definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionDef {
    /// Stable identifier, `<group>.<action>` (e.g., `users.view`).
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// A feature-area grouping of permissions.
#[derive(Debug, Clone, Copy)]
pub struct PermissionGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub permissions: &'static [PermissionDef],
}

macro_rules! perm {
    ($id:literal, $label:literal, $desc:literal) => {
        PermissionDef {
            id: $id,
            label: $label,
            description: $desc,
        }
    };
}

pub static PERMISSION_GROUPS: &[PermissionGroup] = &[
    PermissionGroup {
        id: "users",
        label: "Usuarios",
        permissions: &[
            perm!("users.view", "Ver usuarios", "Ver lista de clientes"),
            perm!("users.create", "Crear usuarios", "Registrar nuevos clientes"),
            perm!("users.edit", "Editar usuarios", "Modificar información de clientes"),
            perm!("users.delete", "Eliminar usuarios", "Eliminar clientes del sistema"),
        ],
    },
    PermissionGroup {
        id: "payments",
        label: "Pagos",
        permissions: &[
            perm!("payments.view", "Ver pagos", "Ver historial de pagos"),
            perm!("payments.create", "Registrar pagos", "Crear nuevos pagos"),
            perm!("payments.edit", "Editar pagos", "Modificar pagos existentes"),
            perm!("payments.delete", "Eliminar pagos", "Eliminar registros de pagos"),
        ],
    },
    PermissionGroup {
        id: "plans",
        label: "Planes",
        permissions: &[
            perm!("plans.view", "Ver planes", "Ver planes disponibles"),
            perm!("plans.create", "Crear planes", "Crear nuevos planes"),
            perm!("plans.edit", "Editar planes", "Modificar planes existentes"),
            perm!("plans.delete", "Eliminar planes", "Eliminar planes"),
        ],
    },
    PermissionGroup {
        id: "classes",
        label: "Clases Especiales",
        permissions: &[
            perm!("classes.view", "Ver clases", "Ver clases programadas"),
            perm!("classes.create", "Crear clases", "Programar nuevas clases"),
            perm!("classes.edit", "Editar clases", "Modificar clases existentes"),
            perm!("classes.delete", "Eliminar clases", "Eliminar clases"),
        ],
    },
    PermissionGroup {
        id: "closings",
        label: "Cierres Mensuales",
        permissions: &[
            perm!("closings.view", "Ver cierres", "Ver historial de cierres mensuales"),
            perm!("closings.edit", "Realizar cierres", "Ejecutar cierre de mes"),
        ],
    },
    PermissionGroup {
        id: "roles",
        label: "Roles y Administradores",
        permissions: &[
            perm!("roles.view", "Ver roles", "Ver roles y administradores"),
            perm!("roles.create", "Crear roles", "Crear nuevos roles"),
            perm!("roles.edit", "Editar roles", "Modificar roles y permisos"),
            perm!("roles.delete", "Eliminar roles", "Eliminar roles"),
        ],
    },
    PermissionGroup {
        id: "settings",
        label: "Configuración",
        permissions: &[
            perm!("settings.view", "Ver configuración", "Ver configuración del gimnasio"),
            perm!("settings.edit", "Editar configuración", "Modificar configuración del sistema"),
        ],
    },
    PermissionGroup {
        id: "dashboard",
        label: "Dashboard",
        permissions: &[
            perm!("dashboard.view", "Ver dashboard", "Acceso al panel principal"),
            perm!("dashboard.reports", "Ver reportes", "Acceso a estadísticas y reportes"),
        ],
    },
];

/// Flat view over every permission in the catalog.
pub fn all_permissions() -> impl Iterator<Item = &'static PermissionDef> {
    PERMISSION_GROUPS.iter().flat_map(|g| g.permissions.iter())
}

/// The full permission set granted to the default `"Admin"` role.
pub fn admin_permission_ids() -> Vec<String> {
    all_permissions().map(|p| p.id.to_string()).collect()
}

/// The read-mostly set granted to the default `"Basico"` role: every
/// permission whose id contains `view` or belongs to the dashboard.
pub fn basic_permission_ids() -> Vec<String> {
    all_permissions()
        .filter(|p| p.id.contains("view") || p.id.starts_with("dashboard"))
        .map(|p| p.id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for p in all_permissions() {
            assert!(seen.insert(p.id), "duplicate permission id: {}", p.id);
        }
    }

    #[test]
    fn admin_set_covers_whole_catalog() {
        assert_eq!(admin_permission_ids().len(), all_permissions().count());
    }

    #[test]
    fn basic_set_is_view_only_plus_dashboard() {
        let basic = basic_permission_ids();
        assert!(basic.contains(&"users.view".to_string()));
        assert!(basic.contains(&"dashboard.view".to_string()));
        assert!(basic.contains(&"dashboard.reports".to_string()));
        assert!(!basic.contains(&"users.delete".to_string()));
        assert!(!basic.contains(&"roles.edit".to_string()));
        for id in &basic {
            assert!(
                id.contains("view") || id.starts_with("dashboard"),
                "unexpected basic permission: {id}"
            );
        }
    }
}
