//! Canonical Combo Handler Block
//!
//! The replacement section appended after the split point. It is a constant,
//! so every run appends the same bytes.

/// Literal that opens every combo handler registration
pub const HANDLER_TOKEN: &str = "ipcMain.handle('combos:";

/// Registration used as the secondary split marker
pub const GET_ALL_REGISTRATION: &str = "ipcMain.handle('combos:getAll'";

/// Channels registered by [`COMBO_HANDLERS_TEMPLATE`], in order
pub const COMBO_CHANNELS: [&str; 4] = [
    "combos:getAll",
    "combos:create",
    "combos:update",
    "combos:delete",
];

/// The single clean set of combo handlers
pub const COMBO_HANDLERS_TEMPLATE: &str = r#"

// ========================================
// COMBO PRODUCTS
// ========================================

ipcMain.handle('combos:getAll', async () => {
    try {
        if (!prisma) return { success: true, data: [] };
        const combos = await prisma.comboProduct.findMany({ orderBy: { createdAt: 'desc' } });
        const products = await prisma.product.findMany();
        const combosWithStock = combos.map(combo => {
            const items = JSON.parse(combo.items || '[]');
            let availableStock = Infinity;
            items.forEach(item => {
                const product = products.find(p => p.id === item.productId);
                if (product && product.variants) {
                    const variants = JSON.parse(product.variants);
                    const variant = variants[item.variantIndex];
                    if (variant) {
                        const possibleCombos = Math.floor((variant.stock || 0) / item.quantity);
                        availableStock = Math.min(availableStock, possibleCombos);
                    }
                } else if (product) {
                    const possibleCombos = Math.floor(product.stock / item.quantity);
                    availableStock = Math.min(availableStock, possibleCombos);
                }
            });
            return { ...combo, stock: availableStock === Infinity ? 0 : availableStock };
        });
        return { success: true, data: combosWithStock };
    } catch (error) {
        console.error('Error getting combos:', error);
        return { success: false, error: error.message };
    }
});

ipcMain.handle('combos:create', async (event, data) => {
    try {
        if (!prisma) throw new Error('Database not initialized');
        const combo = await prisma.comboProduct.create({
            data: { sku: data.sku, name: data.name, items: JSON.stringify(data.items), price: data.price, cost: data.cost, status: 'active' }
        });
        return { success: true, data: combo };
    } catch (error) {
        console.error('Error creating combo:', error);
        return { success: false, error: error.message };
    }
});

ipcMain.handle('combos:update', async (event, id, data) => {
    try {
        if (!prisma) throw new Error('Database not initialized');
        const combo = await prisma.comboProduct.update({
            where: { id: parseInt(id) },
            data: { sku: data.sku, name: data.name, items: JSON.stringify(data.items), price: data.price, cost: data.cost }
        });
        return { success: true, data: combo };
    } catch (error) {
        console.error('Error updating combo:', error);
        return { success: false, error: error.message };
    }
});

ipcMain.handle('combos:delete', async (event, id) => {
    try {
        if (!prisma) throw new Error('Database not initialized');
        await prisma.comboProduct.delete({ where: { id: parseInt(id) } });
        return { success: true };
    } catch (error) {
        console.error('Error deleting combo:', error);
        return { success: false, error: error.message };
    }
});

module.exports = { prisma };
"#;
